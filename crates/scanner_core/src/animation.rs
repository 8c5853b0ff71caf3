//! Time-driven linear interpolation of the marker between two pixel positions.
//!
//! An [`Interpolator`] is created per move and is advanced once per display
//! refresh. It is finite: the exact target is emitted once with `done = true`
//! and every later [`Interpolator::advance`] returns `None`.

use std::time::{Duration, Instant};

use shared::domain::PixelPosition;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationFrame {
    pub position: PixelPosition,
    pub progress: f64,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct Interpolator {
    start: PixelPosition,
    target: PixelPosition,
    started_at: Instant,
    duration: Duration,
    last_progress: f64,
    finished: bool,
}

impl Interpolator {
    pub fn new(
        start: PixelPosition,
        target: PixelPosition,
        duration: Duration,
        started_at: Instant,
    ) -> Self {
        Self {
            start,
            target,
            started_at,
            duration,
            last_progress: 0.0,
            finished: false,
        }
    }

    /// Emits the position for `now`, or `None` once the target was emitted.
    ///
    /// Progress never moves backwards even if `now` does.
    pub fn advance(&mut self, now: Instant) -> Option<InterpolationFrame> {
        if self.finished {
            return None;
        }

        let progress = self.progress_at(now).max(self.last_progress);
        self.last_progress = progress;

        if progress >= 1.0 {
            self.finished = true;
            return Some(InterpolationFrame {
                position: self.target,
                progress: 1.0,
                done: true,
            });
        }

        Some(InterpolationFrame {
            position: lerp(self.start, self.target, progress),
            progress,
            done: false,
        })
    }

    /// Stops the interpolation without emitting the target.
    pub fn cancel(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

pub fn lerp(start: PixelPosition, target: PixelPosition, progress: f64) -> PixelPosition {
    PixelPosition {
        x: start.x + (target.x - start.x) * progress,
        y: start.y + (target.y - start.y) * progress,
    }
}

/// Converts a wire `move_time` into a duration. Non-positive and non-finite
/// values collapse to zero so the move completes on its first tick.
pub fn duration_from_millis(millis: f64) -> Duration {
    if !millis.is_finite() || millis <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
}
