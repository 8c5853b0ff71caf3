//! UI layer for the desktop GUI: app shell and scanner canvas.

pub mod app;
pub mod canvas;

pub use app::ScannerApp;
