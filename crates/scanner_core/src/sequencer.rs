//! Movement/focus sequencing state machine.
//!
//! ```text
//! Idle ──queue non-empty──▶ AwaitingMove ──target moved──▶ Animating ──settled──▶ Idle
//!   │                            └──unchanged / error──▶ Idle
//!   └──queue empty, unfocused──▶ AwaitingFocus ──ok / error──▶ Idle
//! ```
//!
//! The sequencer performs no I/O. [`Sequencer::poll`] hands out at most one
//! [`RemoteRequest`] at a time; the caller executes it and reports back with
//! [`Sequencer::complete_move`] or [`Sequencer::complete_focus`]. Animation is
//! advanced by [`Sequencer::tick`] on every display refresh.

use std::time::{Duration, Instant};

use serde::Serialize;
use shared::domain::{Direction, GridCoordinate, PixelPosition, SessionBounds};
use tracing::{debug, info, warn};

use crate::{
    animation::{InterpolationFrame, Interpolator},
    error::MotionError,
    grid::{GridMapping, Ledger},
    queue::CommandQueue,
    service::{CursorSession, MoveOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    Idle,
    AwaitingMove,
    Animating,
    AwaitingFocus,
}

/// Remote call the caller must perform next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    Move(Vec<Direction>),
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDisposition {
    /// The service reported the current cell; nothing to animate.
    Unchanged,
    Animating {
        target: GridCoordinate,
        duration: Duration,
    },
    /// No move was outstanding.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDisposition {
    /// Focus completed; carries the recorded ledger entry.
    Focused(GridCoordinate),
    /// No focus was outstanding.
    Ignored,
}

/// Marker color hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIndicator {
    Idle,
    Moving,
    Focusing,
}

/// Read-only view of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub position: PixelPosition,
    pub cell: Option<GridCoordinate>,
    pub bounds: Option<SessionBounds>,
    pub visited: &'a [GridCoordinate],
    pub focused_cells: &'a [GridCoordinate],
    pub state: MotionState,
    pub indicator: MarkerIndicator,
    pub cell_size: f64,
}

#[derive(Debug)]
struct ActiveMove {
    target: GridCoordinate,
    interpolator: Interpolator,
}

#[derive(Debug)]
pub struct Sequencer {
    mapping: GridMapping,
    queue: CommandQueue,
    state: MotionState,
    bounds: Option<SessionBounds>,
    current: Option<GridCoordinate>,
    position: PixelPosition,
    focused: bool,
    active: Option<ActiveMove>,
    visited: Ledger,
    focus_ledger: Ledger,
}

impl Sequencer {
    pub fn new(mapping: GridMapping) -> Self {
        Self {
            mapping,
            queue: CommandQueue::new(),
            state: MotionState::Idle,
            bounds: None,
            current: None,
            position: PixelPosition::default(),
            // Nothing to focus until the startup fetch establishes a cell.
            focused: true,
            active: None,
            visited: Ledger::new(),
            focus_ledger: Ledger::new(),
        }
    }

    /// Installs the startup cell and grid bounds and snaps the marker there.
    ///
    /// Any animation in flight is cancelled. An outstanding move or focus
    /// stays outstanding: nothing new is dispatched until its result arrives,
    /// and that result is applied against the new session.
    pub fn establish_session(&mut self, session: CursorSession) {
        if let Some(mut active) = self.active.take() {
            active.interpolator.cancel();
        }
        self.bounds = Some(session.bounds);
        self.current = Some(session.position);
        self.position = self.mapping.to_pixel(session.position);
        if self.state == MotionState::Animating {
            self.state = MotionState::Idle;
        }
        info!(
            x = session.position.x,
            y = session.position.y,
            width = session.bounds.width,
            height = session.bounds.height,
            "scanner session established"
        );
    }

    pub fn enqueue(&mut self, direction: Direction) -> bool {
        self.queue.enqueue(direction)
    }

    /// Starts the next remote call if the sequencer is idle.
    pub fn poll(&mut self) -> Option<RemoteRequest> {
        if self.state != MotionState::Idle || self.current.is_none() {
            return None;
        }

        if !self.queue.is_empty() {
            let batch = self.queue.drain_all();
            debug!(presses = batch.len(), "dispatching move batch");
            self.state = MotionState::AwaitingMove;
            return Some(RemoteRequest::Move(batch));
        }

        if !self.focused {
            debug!("dispatching focus request");
            self.state = MotionState::AwaitingFocus;
            return Some(RemoteRequest::Focus);
        }

        None
    }

    pub fn complete_move(
        &mut self,
        result: Result<MoveOutcome, MotionError>,
        now: Instant,
    ) -> Result<MoveDisposition, MotionError> {
        if self.state != MotionState::AwaitingMove {
            warn!(state = ?self.state, "ignoring move result with no move outstanding");
            return Ok(MoveDisposition::Ignored);
        }
        self.state = MotionState::Idle;

        let outcome = result.inspect_err(|err| warn!(%err, "move request failed"))?;

        if let Some(bounds) = self.bounds {
            if !bounds.contains(outcome.target) {
                let err = MotionError::protocol(format!(
                    "target ({}, {}) outside {}x{} grid",
                    outcome.target.x, outcome.target.y, bounds.width, bounds.height
                ));
                warn!(%err, "rejecting move response");
                return Err(err);
            }
        }

        if self.current == Some(outcome.target) {
            debug!("move resolved to current cell; nothing to animate");
            return Ok(MoveDisposition::Unchanged);
        }

        let target_px = self.mapping.to_pixel(outcome.target);
        self.active = Some(ActiveMove {
            target: outcome.target,
            interpolator: Interpolator::new(self.position, target_px, outcome.duration, now),
        });
        self.state = MotionState::Animating;
        debug!(
            x = outcome.target.x,
            y = outcome.target.y,
            duration_ms = outcome.duration.as_millis() as u64,
            "animating to target"
        );
        Ok(MoveDisposition::Animating {
            target: outcome.target,
            duration: outcome.duration,
        })
    }

    /// Advances the running animation, settling on the target when done.
    pub fn tick(&mut self, now: Instant) -> Option<InterpolationFrame> {
        if self.state != MotionState::Animating {
            return None;
        }
        let active = self.active.as_mut()?;
        let frame = active.interpolator.advance(now)?;
        self.position = frame.position;

        if frame.done {
            let target = active.target;
            self.active = None;
            self.current = Some(target);
            let entry = self.visited.record(target);
            self.focused = false;
            self.state = MotionState::Idle;
            info!(
                x = target.x,
                y = target.y,
                ledger_x = entry.x,
                ledger_y = entry.y,
                "scanner settled"
            );
        }

        Some(frame)
    }

    pub fn complete_focus(
        &mut self,
        result: Result<(), MotionError>,
    ) -> Result<FocusDisposition, MotionError> {
        if self.state != MotionState::AwaitingFocus {
            warn!(state = ?self.state, "ignoring focus result with no focus outstanding");
            return Ok(FocusDisposition::Ignored);
        }
        self.state = MotionState::Idle;

        result.inspect_err(|err| warn!(%err, "focus request failed; will retry when idle"))?;

        let Some(current) = self.current else {
            return Ok(FocusDisposition::Ignored);
        };
        self.focused = true;
        let entry = self.focus_ledger.record(current);
        info!(x = current.x, y = current.y, "scanner focused");
        Ok(FocusDisposition::Focused(entry))
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Idle with nothing queued and nothing left to focus.
    pub fn is_settled(&self) -> bool {
        self.state == MotionState::Idle && self.queue.is_empty() && self.focused
    }

    pub fn current_cell(&self) -> Option<GridCoordinate> {
        self.current
    }

    pub fn bounds(&self) -> Option<SessionBounds> {
        self.bounds
    }

    pub fn position(&self) -> PixelPosition {
        self.position
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    pub fn mapping(&self) -> GridMapping {
        self.mapping
    }

    pub fn visited(&self) -> &Ledger {
        &self.visited
    }

    pub fn focus_ledger(&self) -> &Ledger {
        &self.focus_ledger
    }

    pub fn indicator(&self) -> MarkerIndicator {
        match self.state {
            MotionState::Animating => MarkerIndicator::Moving,
            MotionState::AwaitingFocus => MarkerIndicator::Focusing,
            MotionState::Idle | MotionState::AwaitingMove => MarkerIndicator::Idle,
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            position: self.position,
            cell: self.current,
            bounds: self.bounds,
            visited: self.visited.entries(),
            focused_cells: self.focus_ledger.entries(),
            state: self.state,
            indicator: self.indicator(),
            cell_size: self.mapping.cell_size(),
        }
    }
}

#[cfg(test)]
#[path = "tests/sequencer_tests.rs"]
mod tests;
