//! Backend worker: owns a tokio runtime and the motion-service client, runs
//! one remote call at a time and reports results as [`UiEvent`]s.

use std::thread;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;
use scanner_core::{ClientSettings, HttpMotionService, MotionService};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: ClientSettings,
    repaint: egui::Context,
) {
    thread::spawn(move || {
        let notify = |event: UiEvent| {
            let delivered = forward_event(&ui_tx, event);
            repaint.request_repaint();
            delivered
        };

        notify(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                notify(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let service = match HttpMotionService::new(&settings.server_url, settings.request_timeout)
        {
            Ok(service) => service,
            Err(err) => {
                notify(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("invalid motion service configuration: {err:#}");
                return;
            }
        };
        notify(UiEvent::Info(format!("Backend worker ready ({})", service.base_url())));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend executing command");
                let event = match cmd {
                    BackendCommand::FetchSession => {
                        UiEvent::SessionLoaded(service.fetch_session().await)
                    }
                    BackendCommand::Move { commands } => {
                        UiEvent::MoveFinished(service.request_move(&commands).await)
                    }
                    BackendCommand::Focus => UiEvent::FocusFinished(service.request_focus().await),
                };
                if !notify(event) {
                    break;
                }
            }
            tracing::info!("ui channel closed; backend worker exiting");
        });
    });
}

/// Status events are dropped when the UI queue is full. Results block until
/// the UI takes them, since the sequencer waits on every one. Returns `false`
/// once the UI side is gone.
fn forward_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match event {
        UiEvent::Info(_) | UiEvent::Error(_) => match ui_tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("backend->ui event queue full; dropping status event");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        },
        result => ui_tx.send(result).is_ok(),
    }
}
