use std::time::Duration;

use tokio::sync::Mutex;

use crate::motion::ScannerState;

pub(crate) struct AppState {
    /// Held only long enough to read or update the position.
    pub(crate) scanner: Mutex<ScannerState>,
    /// Serializes move and focus actions: one action at a time.
    pub(crate) action_lock: Mutex<()>,
    pub(crate) focus_duration: Duration,
}

impl AppState {
    pub(crate) fn new(scanner: ScannerState, focus_duration: Duration) -> Self {
        Self {
            scanner: Mutex::new(scanner),
            action_lock: Mutex::new(()),
            focus_duration,
        }
    }
}
