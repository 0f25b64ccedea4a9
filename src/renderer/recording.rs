//! In-memory render surface
//!
//! Records every draw call instead of rasterising. Used for headless runs and
//! for asserting what a frame contains.

use super::RenderSurface;
use crate::color::Rgb;
use crate::sim::Rect;

/// A single recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear { width: f32, height: f32 },
    Rect { rect: Rect, color: Rgb, border: Option<Rgb> },
    Shade { rect: Rect, color: Rgb, alpha: f32 },
    Text { text: String, x: f32, y: f32, color: Rgb, size: u32 },
}

/// Surface that keeps the draw calls of the most recent frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    /// Frames drawn so far (one per `clear`)
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn in the last frame
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bordered rectangles in the last frame (player and obstacles)
    pub fn bordered_rects(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect {
                    rect,
                    border: Some(_),
                    ..
                } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn has_overlay(&self) -> bool {
        self.calls.iter().any(|c| matches!(c, DrawCall::Shade { .. }))
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.calls.clear();
        self.frames += 1;
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb, border: Option<Rgb>) {
        self.calls.push(DrawCall::Rect {
            rect,
            color,
            border,
        });
    }

    fn shade(&mut self, rect: Rect, color: Rgb, alpha: f32) {
        self.calls.push(DrawCall::Shade { rect, color, alpha });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, size: u32) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            color,
            size,
        });
    }
}
