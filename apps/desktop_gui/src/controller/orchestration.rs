//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use scanner_core::{MotionError, RemoteRequest};

use crate::backend_bridge::commands::BackendCommand;

impl From<RemoteRequest> for BackendCommand {
    fn from(value: RemoteRequest) -> Self {
        match value {
            RemoteRequest::Move(commands) => BackendCommand::Move { commands },
            RemoteRequest::Focus => BackendCommand::Focus,
        }
    }
}

/// Queues `cmd` for the backend worker. A failure is reported as a network
/// error so the caller can hand it straight back to the sequencer.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), MotionError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(MotionError::network("UI command queue is full; please retry"))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(MotionError::network(
                "Backend command processor disconnected (possible startup/runtime failure)",
            ))
        }
    }
}
