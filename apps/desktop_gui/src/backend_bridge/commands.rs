//! Backend commands queued from UI to backend worker.

use shared::domain::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchSession,
    Move { commands: Vec<Direction> },
    Focus,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchSession => "fetch_session",
            BackendCommand::Move { .. } => "move",
            BackendCommand::Focus => "focus",
        }
    }
}
