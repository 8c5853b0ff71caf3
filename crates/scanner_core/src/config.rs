use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    driver::DEFAULT_FRAME_INTERVAL, grid::DEFAULT_CELL_SIZE, service::DEFAULT_REQUEST_TIMEOUT,
};

pub const CLIENT_CONFIG_FILE: &str = "scanner.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server_url: String,
    pub cell_size: f64,
    pub request_timeout: Duration,
    pub frame_interval: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            cell_size: DEFAULT_CELL_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

impl ClientSettings {
    /// Applies command-line overrides; invalid cell sizes are ignored.
    pub fn with_overrides(
        mut self,
        server_url: Option<String>,
        cell_size: Option<f64>,
        request_timeout_ms: Option<u64>,
    ) -> Self {
        if let Some(url) = server_url {
            self.server_url = url;
        }
        if let Some(v) = cell_size.filter(|v| valid_cell_size(*v)) {
            self.cell_size = v;
        }
        if let Some(ms) = request_timeout_ms {
            self.request_timeout = Duration::from_millis(ms);
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    cell_size: Option<f64>,
    request_timeout_ms: Option<u64>,
    frame_interval_ms: Option<u64>,
}

/// Defaults, then `scanner.toml` in the working directory, then `SCANNER_*`
/// environment variables.
pub fn load_client_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();
    apply_file(&mut settings, Path::new(CLIENT_CONFIG_FILE));
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut ClientSettings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => apply_file_settings(settings, file_cfg),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable client config")
        }
    }
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.cell_size.filter(|v| valid_cell_size(*v)) {
        settings.cell_size = v;
    }
    if let Some(v) = file_cfg.request_timeout_ms {
        settings.request_timeout = Duration::from_millis(v);
    }
    if let Some(v) = file_cfg.frame_interval_ms {
        settings.frame_interval = Duration::from_millis(v);
    }
}

fn apply_env(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SCANNER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("SCANNER_CELL_SIZE").and_then(|v| v.parse::<f64>().ok()) {
        if valid_cell_size(v) {
            settings.cell_size = v;
        }
    }
    if let Some(v) = var("SCANNER_REQUEST_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
        settings.request_timeout = Duration::from_millis(v);
    }
    if let Some(v) = var("SCANNER_FRAME_INTERVAL_MS").and_then(|v| v.parse::<u64>().ok()) {
        settings.frame_interval = Duration::from_millis(v);
    }
}

fn valid_cell_size(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
