use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        CursorPositionResponse, FocusCursorResponse, MoveCursorRequest, MoveCursorResponse,
    },
};
use tracing::{debug, info};

use crate::app_state::AppState;

/// Upper bound on presses accepted in one move request.
pub(crate) const MAX_KEY_PRESSES: usize = 256;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn validation_error(message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(ErrorCode::Validation, message)),
    )
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn get_cursor_position(
    State(state): State<Arc<AppState>>,
) -> Json<CursorPositionResponse> {
    let scanner = state.scanner.lock().await;
    Json(CursorPositionResponse {
        current_position: scanner.position,
        size: scanner.bounds,
    })
}

pub(crate) async fn move_cursor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoveCursorRequest>, JsonRejection>,
) -> ApiResult<MoveCursorResponse> {
    let Json(req) = payload.map_err(|rejection| validation_error(rejection.body_text()))?;
    if req.key_presses.len() > MAX_KEY_PRESSES {
        return Err(validation_error(format!(
            "at most {MAX_KEY_PRESSES} key presses per move"
        )));
    }

    let _action = state.action_lock.lock().await;
    let plan = state.scanner.lock().await.apply(&req.key_presses);
    info!(
        x = plan.target.x,
        y = plan.target.y,
        steps = plan.steps,
        move_time_ms = plan.move_time_ms,
        "moving cursor"
    );

    Ok(Json(MoveCursorResponse {
        new_position: plan.target,
        move_time: plan.move_time_ms,
    }))
}

pub(crate) async fn focus_cursor(State(state): State<Arc<AppState>>) -> Json<FocusCursorResponse> {
    let _action = state.action_lock.lock().await;
    tokio::time::sleep(state.focus_duration).await;
    debug!("cursor focus completed");
    Json(FocusCursorResponse {
        focus_time: state.focus_duration.as_millis() as f64,
    })
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
