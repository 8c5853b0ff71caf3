//! Desktop app shell: owns the sequencer on the UI thread, feeds it keyboard
//! input and backend results, and paints the scanner canvas.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use scanner_core::{GridMapping, MotionState, RemoteRequest, Sequencer};
use shared::domain::Direction;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::canvas;

pub struct ScannerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    sequencer: Sequencer,
    status: String,
    last_error: Option<UiError>,
}

impl ScannerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        mapping: GridMapping,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            sequencer: Sequencer::new(mapping),
            status: "Connecting...".to_string(),
            last_error: None,
        }
    }

    pub fn request_session(&mut self) {
        self.status = "Fetching scanner position...".to_string();
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::FetchSession) {
            self.last_error = Some(UiError::from_motion(UiErrorContext::Session, &err));
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    tracing::error!(context = err.context().label(), "{}", err.message());
                    self.last_error = Some(err);
                }
                UiEvent::SessionLoaded(Ok(session)) => {
                    self.status = format!(
                        "Connected: {}x{} grid",
                        session.bounds.width, session.bounds.height
                    );
                    self.last_error = None;
                    self.sequencer.establish_session(session);
                }
                UiEvent::SessionLoaded(Err(err)) => {
                    self.status = "Not connected".to_string();
                    self.last_error = Some(UiError::from_motion(UiErrorContext::Session, &err));
                }
                UiEvent::MoveFinished(result) => {
                    if let Err(err) = self.sequencer.complete_move(result, Instant::now()) {
                        self.last_error = Some(UiError::from_motion(UiErrorContext::Move, &err));
                    }
                }
                UiEvent::FocusFinished(result) => {
                    if let Err(err) = self.sequencer.complete_focus(result) {
                        self.last_error = Some(UiError::from_motion(UiErrorContext::Focus, &err));
                    }
                }
            }
        }
    }

    fn capture_arrow_keys(&mut self, ctx: &egui::Context) {
        let pressed: Vec<Direction> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => direction_for_key(*key),
                    _ => None,
                })
                .collect()
        });
        for direction in pressed {
            self.sequencer.enqueue(direction);
        }
    }

    fn dispatch_pending(&mut self) {
        let Some(request) = self.sequencer.poll() else {
            return;
        };
        let is_move = matches!(request, RemoteRequest::Move(_));
        let Err(err) = dispatch_backend_command(&self.cmd_tx, request.into()) else {
            return;
        };

        let outcome = if is_move {
            self.sequencer
                .complete_move(Err(err), Instant::now())
                .map(|_| ())
        } else {
            self.sequencer.complete_focus(Err(err)).map(|_| ())
        };
        if let Err(err) = outcome {
            let context = if is_move {
                UiErrorContext::Move
            } else {
                UiErrorContext::Focus
            };
            self.last_error = Some(UiError::from_motion(context, &err));
        }
    }

    fn is_busy(&self) -> bool {
        self.sequencer.state() != MotionState::Idle || self.sequencer.pending_commands() > 0
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("scanner_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let position = self.sequencer.position();
                ui.label(format!(
                    "Scanner Position: ({}, {})",
                    position.x.round(),
                    position.y.round()
                ));
                ui.separator();
                if let Some(cell) = self.sequencer.current_cell() {
                    ui.label(format!("Cell: ({}, {})", cell.x, cell.y));
                    ui.separator();
                }
                ui.label(format!("State: {:?}", self.sequencer.state()));
                ui.separator();
                ui.label(format!("Queued: {}", self.sequencer.pending_commands()));
                ui.separator();
                ui.label(
                    egui::RichText::new(&self.status).color(ui.visuals().weak_text_color()),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reconnect").clicked() {
                        self.request_session();
                    }
                });
            });

            let mut dismiss = false;
            if let Some(err) = &self.last_error {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!(
                            "{} error ({:?}): {}",
                            err.context().label(),
                            err.category(),
                            err.message()
                        ),
                    );
                    dismiss = ui.small_button("Dismiss").clicked();
                });
            }
            if dismiss {
                self.last_error = None;
            }
        });
    }

    fn show_canvas(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let snapshot = self.sequencer.snapshot();
                let (response, painter) =
                    ui.allocate_painter(canvas::canvas_size(&snapshot), egui::Sense::hover());
                painter.extend(canvas::scene_shapes(response.rect.min, &snapshot));
            });
        });
    }
}

impl eframe::App for ScannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.capture_arrow_keys(ctx);
        self.dispatch_pending();
        self.sequencer.tick(Instant::now());

        self.show_top_bar(ctx);
        self.show_canvas(ctx);

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn direction_for_key(key: egui::Key) -> Option<Direction> {
    match key {
        egui::Key::ArrowLeft => Some(Direction::Left),
        egui::Key::ArrowRight => Some(Direction::Right),
        egui::Key::ArrowUp => Some(Direction::Up),
        egui::Key::ArrowDown => Some(Direction::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use scanner_core::{CursorSession, MotionError, MoveOutcome};
    use shared::domain::{GridCoordinate, SessionBounds};

    use super::*;
    use crate::controller::events::UiErrorCategory;

    struct Harness {
        app: ScannerApp,
        cmd_rx: Receiver<BackendCommand>,
        ui_tx: Sender<UiEvent>,
    }

    fn harness() -> Harness {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        Harness {
            app: ScannerApp::new(cmd_tx, ui_rx, GridMapping::default()),
            cmd_rx,
            ui_tx,
        }
    }

    fn session() -> CursorSession {
        CursorSession {
            position: GridCoordinate::new(2, 2),
            bounds: SessionBounds::new(10, 10),
        }
    }

    #[test]
    fn maps_only_arrow_keys() {
        assert_eq!(direction_for_key(egui::Key::ArrowUp), Some(Direction::Up));
        assert_eq!(direction_for_key(egui::Key::ArrowLeft), Some(Direction::Left));
        assert_eq!(direction_for_key(egui::Key::A), None);
        assert_eq!(direction_for_key(egui::Key::Enter), None);
    }

    #[test]
    fn request_session_queues_fetch() {
        let mut h = harness();
        h.app.request_session();
        assert_eq!(h.cmd_rx.try_recv().ok(), Some(BackendCommand::FetchSession));
        assert!(h.app.last_error.is_none());
    }

    #[test]
    fn queued_input_dispatches_one_move_batch() {
        let mut h = harness();
        h.ui_tx
            .try_send(UiEvent::SessionLoaded(Ok(session())))
            .expect("send");
        h.app.process_ui_events();

        h.app.sequencer.enqueue(Direction::Right);
        h.app.sequencer.enqueue(Direction::Right);
        h.app.dispatch_pending();
        h.app.dispatch_pending();

        assert_eq!(
            h.cmd_rx.try_recv().ok(),
            Some(BackendCommand::Move {
                commands: vec![Direction::Right, Direction::Right]
            })
        );
        assert!(h.cmd_rx.try_recv().is_err());
        assert_eq!(h.app.sequencer.state(), MotionState::AwaitingMove);

        h.ui_tx
            .try_send(UiEvent::MoveFinished(Ok(MoveOutcome {
                target: GridCoordinate::new(4, 2),
                duration: Duration::from_millis(50),
            })))
            .expect("send");
        h.app.process_ui_events();
        assert_eq!(h.app.sequencer.state(), MotionState::Animating);
        assert!(h.app.is_busy());
    }

    #[test]
    fn failed_dispatch_returns_sequencer_to_idle() {
        let mut h = harness();
        h.ui_tx
            .try_send(UiEvent::SessionLoaded(Ok(session())))
            .expect("send");
        h.app.process_ui_events();
        drop(h.cmd_rx);

        h.app.sequencer.enqueue(Direction::Up);
        h.app.dispatch_pending();

        assert_eq!(h.app.sequencer.state(), MotionState::Idle);
        let err = h.app.last_error.as_ref().expect("error recorded");
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::Move);
    }

    #[test]
    fn session_failure_is_reported() {
        let mut h = harness();
        h.ui_tx
            .try_send(UiEvent::SessionLoaded(Err(MotionError::TimedOut(
                Duration::from_secs(10),
            ))))
            .expect("send");
        h.app.process_ui_events();

        let err = h.app.last_error.as_ref().expect("error recorded");
        assert_eq!(err.category(), UiErrorCategory::Timeout);
        assert_eq!(h.app.sequencer.current_cell(), None);
    }
}
