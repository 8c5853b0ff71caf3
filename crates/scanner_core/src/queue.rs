use std::collections::VecDeque;

use shared::domain::Direction;

/// Maximum number of pending directional tokens.
pub const COMMAND_QUEUE_CAPACITY: usize = 60;

/// FIFO of directional key presses waiting for the next move request.
///
/// Overflow policy is drop-newest: once the queue holds
/// [`COMMAND_QUEUE_CAPACITY`] tokens further presses are discarded until the
/// queue is drained.
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    pending: VecDeque<Direction>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `direction`; returns `false` if it was dropped.
    pub fn enqueue(&mut self, direction: Direction) -> bool {
        if self.pending.len() >= COMMAND_QUEUE_CAPACITY {
            tracing::debug!(?direction, "command queue full; dropping key press");
            return false;
        }
        self.pending.push_back(direction);
        true
    }

    /// Takes every pending token in press order, leaving the queue empty.
    pub fn drain_all(&mut self) -> Vec<Direction> {
        std::mem::take(&mut self.pending).into()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
