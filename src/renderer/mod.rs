//! Rendering module
//!
//! The game draws through [`RenderSurface`], a small set of 2D primitives that
//! a browser canvas, a test recorder, or any other backend can provide.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};
pub use scene::{FrameView, draw_frame};

use crate::color::Rgb;
use crate::sim::Rect;

/// 2D drawing primitives used by the games
pub trait RenderSurface {
    /// Erase the whole drawing area
    fn clear(&mut self, width: f32, height: f32);

    /// Solid rectangle with an optional 2px border
    fn fill_rect(&mut self, rect: Rect, color: Rgb, border: Option<Rgb>);

    /// Translucent rectangle (overlays)
    fn shade(&mut self, rect: Rect, color: Rgb, alpha: f32);

    /// Pixel-font text; `y` is the baseline
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, size: u32);
}
