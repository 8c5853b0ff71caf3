//! Client core for the scanner remote: input batching, the motion/focus
//! sequencer, marker animation and the motion-service client.

pub mod animation;
pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod queue;
pub mod sequencer;
pub mod service;

pub use animation::{InterpolationFrame, Interpolator};
pub use config::{load_client_settings, ClientSettings};
pub use driver::{MotionDriver, SettleReport};
pub use error::MotionError;
pub use grid::{ledger_cell, GridMapping, Ledger};
pub use queue::{CommandQueue, COMMAND_QUEUE_CAPACITY};
pub use sequencer::{
    FocusDisposition, MarkerIndicator, MotionState, MoveDisposition, RemoteRequest,
    RenderSnapshot, Sequencer,
};
pub use service::{CursorSession, HttpMotionService, MotionService, MoveOutcome};
