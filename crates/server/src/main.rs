use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use shared::protocol::{FOCUS_CURSOR_PATH, GET_CURSOR_POSITION_PATH, MOVE_CURSOR_PATH};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

mod api;
mod app_state;
mod config;
mod motion;

use app_state::AppState;
use config::load_settings;
use motion::ScannerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let scanner = ScannerState::new(settings.initial_position(), settings.bounds());
    info!(
        width = scanner.bounds.width,
        height = scanner.bounds.height,
        x = scanner.position.x,
        y = scanner.position.y,
        "scanner grid ready"
    );
    let state = AppState::new(scanner, settings.focus_duration());
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "motion service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(api::healthz))
        .route(GET_CURSOR_POSITION_PATH, get(api::get_cursor_position))
        .route(MOVE_CURSOR_PATH, post(api::move_cursor))
        .route(FOCUS_CURSOR_PATH, get(api::focus_cursor))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
