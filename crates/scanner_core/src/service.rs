use std::{future::Future, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Direction, GridCoordinate, SessionBounds},
    error::ApiError,
    protocol::{
        CursorPositionResponse, MoveCursorRequest, MoveCursorResponse, FOCUS_CURSOR_PATH,
        GET_CURSOR_POSITION_PATH, MOVE_CURSOR_PATH,
    },
};
use url::Url;

use crate::{animation::duration_from_millis, error::MotionError};

/// Startup state reported by the motion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSession {
    pub position: GridCoordinate,
    pub bounds: SessionBounds,
}

/// Decoded answer to a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub target: GridCoordinate,
    pub duration: Duration,
}

impl From<MoveCursorResponse> for MoveOutcome {
    fn from(value: MoveCursorResponse) -> Self {
        Self {
            target: value.new_position,
            duration: duration_from_millis(value.move_time),
        }
    }
}

#[async_trait]
pub trait MotionService: Send + Sync {
    async fn fetch_session(&self) -> Result<CursorSession, MotionError>;
    async fn request_move(&self, commands: &[Direction]) -> Result<MoveOutcome, MotionError>;
    async fn request_focus(&self) -> Result<(), MotionError>;
}

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// [`MotionService`] over the service's JSON/HTTP API.
pub struct HttpMotionService {
    http: Client,
    base_url: Url,
    request_timeout: Duration,
}

impl HttpMotionService {
    pub fn new(server_url: &str, request_timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(server_url.trim())
            .with_context(|| format!("invalid motion service url '{server_url}'"))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, MotionError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| MotionError::network(format!("invalid endpoint {path}: {err}")))
    }

    async fn with_deadline<T>(
        &self,
        call: impl Future<Output = Result<T, MotionError>>,
    ) -> Result<T, MotionError> {
        tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| MotionError::TimedOut(self.request_timeout))?
    }
}

#[async_trait]
impl MotionService for HttpMotionService {
    async fn fetch_session(&self) -> Result<CursorSession, MotionError> {
        let url = self.endpoint(GET_CURSOR_POSITION_PATH)?;
        self.with_deadline(async {
            let res = self.http.get(url).send().await?;
            let body: CursorPositionResponse = read_json(res).await?;
            Ok(CursorSession {
                position: body.current_position,
                bounds: body.size,
            })
        })
        .await
    }

    async fn request_move(&self, commands: &[Direction]) -> Result<MoveOutcome, MotionError> {
        let url = self.endpoint(MOVE_CURSOR_PATH)?;
        let request = MoveCursorRequest::from_directions(commands);
        tracing::debug!(presses = commands.len(), "requesting move");
        self.with_deadline(async {
            let res = self.http.post(url).json(&request).send().await?;
            let body: MoveCursorResponse = read_json(res).await?;
            Ok(MoveOutcome::from(body))
        })
        .await
    }

    async fn request_focus(&self) -> Result<(), MotionError> {
        let url = self.endpoint(FOCUS_CURSOR_PATH)?;
        tracing::debug!("requesting focus");
        self.with_deadline(async {
            let res = self.http.get(url).send().await?;
            ensure_success(res).await?;
            Ok(())
        })
        .await
    }
}

async fn ensure_success(res: Response) -> Result<Response, MotionError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|err| err.message)
        .unwrap_or(body);
    Err(MotionError::network(format!("{status}: {message}")))
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, MotionError> {
    let res = ensure_success(res).await?;
    let bytes = res.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|err| MotionError::protocol(format!("unexpected response shape: {err}")))
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
