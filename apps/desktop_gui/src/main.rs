mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use scanner_core::{load_client_settings, GridMapping};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::ScannerApp;

/// Desktop scanner remote control.
#[derive(Parser, Debug)]
struct StartupArgs {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    cell_size: Option<f64>,
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = StartupArgs::parse();
    let settings =
        load_client_settings().with_overrides(args.server_url, args.cell_size, args.timeout_ms);
    tracing::info!(server_url = %settings.server_url, "starting scanner desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Scanner Remote Control")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Scanner Remote Control",
        options,
        Box::new(move |cc| {
            let mapping = GridMapping::new(settings.cell_size);
            backend_bridge::runtime::launch(cmd_rx, ui_tx, settings, cc.egui_ctx.clone());
            let mut app = ScannerApp::new(cmd_tx, ui_rx, mapping);
            app.request_session();
            Ok(Box::new(app))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_args_are_optional() {
        let args = StartupArgs::try_parse_from(["desktop_gui"]).expect("parse");
        assert!(args.server_url.is_none());
        assert!(args.cell_size.is_none());

        let args = StartupArgs::try_parse_from([
            "desktop_gui",
            "--server-url",
            "http://10.0.0.2:8000",
            "--timeout-ms",
            "2500",
        ])
        .expect("parse");
        assert_eq!(args.server_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(args.timeout_ms, Some(2500));
    }
}
