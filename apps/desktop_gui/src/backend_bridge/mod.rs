//! Bridge between the UI thread and the backend worker that performs remote calls.

pub mod commands;
pub mod runtime;
