//! Backend events and error modeling for the desktop GUI controller.

use scanner_core::{CursorSession, MotionError, MoveOutcome};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    SessionLoaded(Result<CursorSession, MotionError>),
    MoveFinished(Result<MoveOutcome, MotionError>),
    FocusFinished(Result<(), MotionError>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Protocol,
    Timeout,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Session,
    Move,
    Focus,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Backend",
            UiErrorContext::Session => "Connect",
            UiErrorContext::Move => "Move",
            UiErrorContext::Focus => "Focus",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timed out") || message_lower.contains("timeout") {
            UiErrorCategory::Timeout
        } else if message_lower.contains("protocol")
            || message_lower.contains("unexpected response")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Protocol
        } else if message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_motion(context: UiErrorContext, err: &MotionError) -> Self {
        let category = match err {
            MotionError::Network(_) => UiErrorCategory::Transport,
            MotionError::Protocol(_) => UiErrorCategory::Protocol,
            MotionError::TimedOut(_) => UiErrorCategory::Timeout,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
