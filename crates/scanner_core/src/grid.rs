//! Grid index mapping and the visitation/focus ledgers.

use serde::Serialize;
use shared::domain::{GridCoordinate, PixelPosition, SessionBounds};

pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Fixed linear mapping from grid cells to marker pixel positions.
///
/// The mapping only goes one way: the current cell always comes from the
/// motion service, never from the animated pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping {
    cell_size: f64,
}

impl GridMapping {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Center of `coord` on screen: `coord * cell - cell / 2`.
    pub fn to_pixel(&self, coord: GridCoordinate) -> PixelPosition {
        let half = self.cell_size / 2.0;
        PixelPosition {
            x: coord.x as f64 * self.cell_size - half,
            y: coord.y as f64 * self.cell_size - half,
        }
    }

    /// Pixel rectangle covered by a ledger entry, as `(origin, size)`.
    pub fn cell_rect(&self, entry: GridCoordinate) -> (PixelPosition, f64) {
        (
            PixelPosition {
                x: entry.x as f64 * self.cell_size,
                y: entry.y as f64 * self.cell_size,
            },
            self.cell_size,
        )
    }

    /// Drawing surface size in pixels for a session.
    pub fn canvas_size(&self, bounds: SessionBounds) -> (f64, f64) {
        (
            bounds.width as f64 * self.cell_size,
            bounds.height as f64 * self.cell_size,
        )
    }
}

impl Default for GridMapping {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

/// Ledger key for a settled cell: one less per axis, floored at zero.
pub fn ledger_cell(coord: GridCoordinate) -> GridCoordinate {
    GridCoordinate {
        x: (coord.x - 1).max(0),
        y: (coord.y - 1).max(0),
    }
}

/// Append-only record of grid cells. Duplicates are kept.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<GridCoordinate>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `coord` after applying [`ledger_cell`].
    pub fn record(&mut self, coord: GridCoordinate) -> GridCoordinate {
        let entry = ledger_cell(coord);
        self.entries.push(entry);
        entry
    }

    pub fn entries(&self) -> &[GridCoordinate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
