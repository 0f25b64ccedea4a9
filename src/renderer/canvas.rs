//! Canvas 2D render surface (browser only)

use web_sys::CanvasRenderingContext2d;

use super::RenderSurface;
use crate::color::Rgb;
use crate::consts::BORDER_WIDTH;
use crate::sim::Rect;

/// Font stack for pixel-style text
const PIXEL_FONT: &str = "'Press Start 2P', monospace";

/// [`RenderSurface`] backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb, border: Option<Rgb>) {
        let (x, y) = (rect.pos.x as f64, rect.pos.y as f64);
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);

        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(x, y, w, h);

        if let Some(border) = border {
            self.ctx.set_stroke_style_str(&border.to_hex());
            self.ctx.set_line_width(BORDER_WIDTH as f64);
            self.ctx.stroke_rect(x, y, w, h);
        }
    }

    fn shade(&mut self, rect: Rect, color: Rgb, alpha: f32) {
        self.ctx.set_fill_style_str(&color.to_css_rgba(alpha));
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, size: u32) {
        self.ctx.set_font(&format!("{}px {}", size, PIXEL_FONT));
        self.ctx.set_fill_style_str(&color.to_hex());
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
