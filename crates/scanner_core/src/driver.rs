use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::{
    error::MotionError,
    grid::GridMapping,
    sequencer::{MotionState, MoveDisposition, RemoteRequest, Sequencer},
    service::{CursorSession, MotionService},
};

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// What happened during one [`MotionDriver::run_until_settled`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettleReport {
    pub moves_animated: usize,
    pub moves_unchanged: usize,
    pub move_failures: Vec<MotionError>,
    pub focus_completions: usize,
}

/// Runs a [`Sequencer`] against a [`MotionService`] on the current task,
/// ticking animations on a fixed frame interval.
pub struct MotionDriver<S> {
    service: S,
    sequencer: Sequencer,
    frame_interval: Duration,
}

impl<S: MotionService> MotionDriver<S> {
    pub fn new(service: S, mapping: GridMapping, frame_interval: Duration) -> Self {
        Self {
            service,
            sequencer: Sequencer::new(mapping),
            frame_interval,
        }
    }

    /// Startup fetch of the current cell and grid bounds.
    pub async fn connect(&mut self) -> Result<CursorSession, MotionError> {
        let session = self.service.fetch_session().await?;
        self.sequencer.establish_session(session);
        Ok(session)
    }

    pub fn enqueue(&mut self, direction: shared::domain::Direction) -> bool {
        self.sequencer.enqueue(direction)
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Drives the sequencer until it is idle, the queue is empty and the
    /// current cell is focused.
    ///
    /// Move failures are recorded in the report and the loop carries on. A
    /// focus failure ends the run with that error; the focus is retried on
    /// the next call.
    pub async fn run_until_settled(&mut self) -> Result<SettleReport, MotionError> {
        let mut report = SettleReport::default();
        let mut frames = tokio::time::interval(self.frame_interval.max(Duration::from_millis(1)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            if let Some(request) = self.sequencer.poll() {
                match request {
                    RemoteRequest::Move(batch) => {
                        let result = self.service.request_move(&batch).await;
                        match self.sequencer.complete_move(result, Instant::now()) {
                            Ok(MoveDisposition::Animating { .. }) => report.moves_animated += 1,
                            Ok(MoveDisposition::Unchanged) => report.moves_unchanged += 1,
                            Ok(MoveDisposition::Ignored) => {}
                            Err(err) => report.move_failures.push(err),
                        }
                    }
                    RemoteRequest::Focus => {
                        let result = self.service.request_focus().await;
                        self.sequencer.complete_focus(result)?;
                        report.focus_completions += 1;
                    }
                }
                continue;
            }

            if self.sequencer.state() != MotionState::Animating {
                if self.sequencer.current_cell().is_none() {
                    warn!("run_until_settled called before connect; nothing to do");
                }
                debug!(?report, "scanner settled");
                return Ok(report);
            }

            frames.tick().await;
            self.sequencer.tick(Instant::now());
        }
    }
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
