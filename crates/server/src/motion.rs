//! Grid motion planning for the reference service.

use shared::{
    domain::{GridCoordinate, SessionBounds},
    protocol::KeyPress,
};

/// `move_time = MOVE_TIME_SCALE_MS * sqrt(steps)`.
pub(crate) const MOVE_TIME_SCALE_MS: f64 = 3000.0;

/// Net displacement of a press batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PressCounts {
    pub(crate) dx: i64,
    pub(crate) dy: i64,
    pub(crate) ignored: usize,
}

impl PressCounts {
    pub(crate) fn tally(presses: &[KeyPress]) -> Self {
        let mut counts = Self::default();
        for press in presses {
            match press.direction() {
                Some(direction) => {
                    let (dx, dy) = direction.delta();
                    counts.dx += dx;
                    counts.dy += dy;
                }
                None => counts.ignored += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MovePlan {
    pub(crate) target: GridCoordinate,
    pub(crate) steps: i64,
    pub(crate) move_time_ms: f64,
}

pub(crate) fn move_time_ms(steps: i64) -> f64 {
    MOVE_TIME_SCALE_MS * (steps.max(0) as f64).sqrt()
}

/// Net displacement of `counts`, clamped to the grid. Steps count only the
/// distance actually travelled.
pub(crate) fn plan_move(
    current: GridCoordinate,
    bounds: SessionBounds,
    counts: PressCounts,
) -> MovePlan {
    let target = bounds.clamp(current.offset(counts.dx, counts.dy));
    let steps = (target.x - current.x).abs() + (target.y - current.y).abs();
    MovePlan {
        target,
        steps,
        move_time_ms: move_time_ms(steps),
    }
}

/// Position of the simulated scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScannerState {
    pub(crate) position: GridCoordinate,
    pub(crate) bounds: SessionBounds,
}

impl ScannerState {
    pub(crate) fn new(position: GridCoordinate, bounds: SessionBounds) -> Self {
        Self {
            position: bounds.clamp(position),
            bounds,
        }
    }

    pub(crate) fn apply(&mut self, presses: &[KeyPress]) -> MovePlan {
        let plan = plan_move(self.position, self.bounds, PressCounts::tally(presses));
        self.position = plan.target;
        plan
    }
}
