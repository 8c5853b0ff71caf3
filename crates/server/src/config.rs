use std::{fs, time::Duration};

use serde::Deserialize;
use shared::domain::{GridCoordinate, SessionBounds};

pub(crate) const SERVER_CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub grid_width: i64,
    pub grid_height: i64,
    pub initial_x: i64,
    pub initial_y: i64,
    pub focus_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            grid_width: 37,
            grid_height: 18,
            initial_x: 19,
            initial_y: 9,
            focus_ms: 2000,
        }
    }
}

impl Settings {
    pub fn bounds(&self) -> SessionBounds {
        SessionBounds::new(self.grid_width.max(1), self.grid_height.max(1))
    }

    pub fn initial_position(&self) -> GridCoordinate {
        GridCoordinate::new(self.initial_x, self.initial_y)
    }

    pub fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.focus_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    grid_width: Option<i64>,
    grid_height: Option<i64>,
    initial_x: Option<i64>,
    initial_y: Option<i64>,
    focus_ms: Option<u64>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SERVER_CONFIG_FILE) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, file_cfg),
            Err(err) => tracing::warn!(%err, "ignoring unreadable {SERVER_CONFIG_FILE}"),
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.grid_width {
        settings.grid_width = v;
    }
    if let Some(v) = file_cfg.grid_height {
        settings.grid_height = v;
    }
    if let Some(v) = file_cfg.initial_x {
        settings.initial_x = v;
    }
    if let Some(v) = file_cfg.initial_y {
        settings.initial_y = v;
    }
    if let Some(v) = file_cfg.focus_ms {
        settings.focus_ms = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("APP__GRID_WIDTH").and_then(|v| v.parse::<i64>().ok()) {
        settings.grid_width = v;
    }
    if let Some(v) = var("APP__GRID_HEIGHT").and_then(|v| v.parse::<i64>().ok()) {
        settings.grid_height = v;
    }
    if let Some(v) = var("APP__INITIAL_X").and_then(|v| v.parse::<i64>().ok()) {
        settings.initial_x = v;
    }
    if let Some(v) = var("APP__INITIAL_Y").and_then(|v| v.parse::<i64>().ok()) {
        settings.initial_y = v;
    }
    if let Some(v) = var("APP__FOCUS_MS").and_then(|v| v.parse::<u64>().ok()) {
        settings.focus_ms = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
