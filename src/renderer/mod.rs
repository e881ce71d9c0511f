//! Rendering module
//!
//! `shapes` turns game state into a display list; `canvas` plays that list
//! onto a browser 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{DrawCmd, build_frame, frame_needed};
