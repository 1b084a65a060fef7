//! Rendering module
//!
//! Canvas2D drawing of a `FrameView` plus the screen effects overlay.

pub mod canvas;

pub use canvas::CanvasRenderer;
