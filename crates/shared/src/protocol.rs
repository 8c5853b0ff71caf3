use serde::{Deserialize, Serialize};

use crate::domain::{Direction, GridCoordinate, SessionBounds};

pub const GET_CURSOR_POSITION_PATH: &str = "/get_cursor_position/";
pub const MOVE_CURSOR_PATH: &str = "/move_cursor/";
pub const FOCUS_CURSOR_PATH: &str = "/focus_cursor/";

/// A single key press as sent on the wire. Kept as a raw key name so the
/// service can ignore tokens it does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
}

impl KeyPress {
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_key_name(&self.key)
    }
}

impl From<Direction> for KeyPress {
    fn from(value: Direction) -> Self {
        Self {
            key: value.key_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCursorRequest {
    pub key_presses: Vec<KeyPress>,
}

impl MoveCursorRequest {
    pub fn from_directions(directions: &[Direction]) -> Self {
        Self {
            key_presses: directions.iter().copied().map(KeyPress::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCursorResponse {
    pub new_position: GridCoordinate,
    /// Move duration in milliseconds.
    pub move_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPositionResponse {
    pub current_position: GridCoordinate,
    pub size: SessionBounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusCursorResponse {
    #[serde(default)]
    pub focus_time: f64,
}
