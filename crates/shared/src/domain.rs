use serde::{Deserialize, Serialize};

/// Discrete cell index on the scanner grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: i64,
    pub y: i64,
}

impl GridCoordinate {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Continuous on-screen coordinate of the marker.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: f64,
    pub y: f64,
}

impl PixelPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ArrowLeft")]
    Left,
    #[serde(rename = "ArrowRight")]
    Right,
    #[serde(rename = "ArrowUp")]
    Up,
    #[serde(rename = "ArrowDown")]
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Key name used on the wire.
    pub fn key_name(self) -> &'static str {
        match self {
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
        }
    }

    pub fn from_key_name(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key_name() == key)
    }

    /// Unit step in grid space; `y` grows downwards.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Grid extent in cells, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBounds {
    pub width: i64,
    pub height: i64,
}

impl SessionBounds {
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Whether `coord` is a cell index the service may report.
    pub fn contains(&self, coord: GridCoordinate) -> bool {
        (0..=self.width).contains(&coord.x) && (0..=self.height).contains(&coord.y)
    }

    /// Clamp into the addressable `1..=width` / `1..=height` range.
    pub fn clamp(&self, coord: GridCoordinate) -> GridCoordinate {
        GridCoordinate {
            x: coord.x.clamp(1, self.width.max(1)),
            y: coord.y.clamp(1, self.height.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_key_names_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_key_name(direction.key_name()), Some(direction));
        }
        assert_eq!(Direction::from_key_name("Enter"), None);
    }

    #[test]
    fn direction_serializes_as_browser_key_name() {
        let json = serde_json::to_string(&Direction::Down).expect("json");
        assert_eq!(json, "\"ArrowDown\"");
    }

    #[test]
    fn deltas_step_one_cell_with_y_growing_down() {
        let start = GridCoordinate::new(5, 5);
        let moved = Direction::ALL.into_iter().fold(start, |cell, d| {
            let (dx, dy) = d.delta();
            cell.offset(dx, dy)
        });
        assert_eq!(moved, start);
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn bounds_accept_lower_edge_clamp_but_not_overflow() {
        let bounds = SessionBounds::new(10, 5);
        assert!(bounds.contains(GridCoordinate::new(0, 0)));
        assert!(bounds.contains(GridCoordinate::new(10, 5)));
        assert!(!bounds.contains(GridCoordinate::new(11, 5)));
        assert!(!bounds.contains(GridCoordinate::new(3, -1)));
    }

    #[test]
    fn clamp_keeps_cells_one_based() {
        let bounds = SessionBounds::new(4, 4);
        assert_eq!(
            bounds.clamp(GridCoordinate::new(-3, 9)),
            GridCoordinate::new(1, 4)
        );
    }
}
