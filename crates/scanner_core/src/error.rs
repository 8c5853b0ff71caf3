use std::time::Duration;

use thiserror::Error;

/// Failure of a remote motion-service call.
///
/// Every variant feeds the same recovery path: the sequencer drops back to
/// `Idle` without touching the ledgers or the current cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotionError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("protocol mismatch: {0}")]
    Protocol(String),
    #[error("request timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

impl MotionError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}

impl From<reqwest::Error> for MotionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Protocol(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
