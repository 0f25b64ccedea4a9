//! Full-frame drawing of the jumper world

use super::RenderSurface;
use crate::color::Rgb;
use crate::consts::*;
use crate::sim::{Rect, RunState, Viewport, World};
use crate::tuning::Tuning;

/// Read-only snapshot handed to the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub world: &'a World,
    pub tuning: &'a Tuning,
    pub viewport: Viewport,
    pub run_state: RunState,
}

/// Draw background, ground, player, obstacles and any state overlay
pub fn draw_frame<S: RenderSurface + ?Sized>(view: &FrameView<'_>, surface: &mut S) {
    let Viewport { width, height } = view.viewport;
    let tuning = view.tuning;
    let ground_line = view.viewport.ground_line(tuning.ground_height);

    surface.clear(width, height);
    surface.fill_rect(Rect::new(0.0, 0.0, width, height), tuning.background_color, None);
    surface.fill_rect(
        Rect::new(0.0, ground_line, width, tuning.ground_height),
        tuning.ground_color,
        None,
    );
    draw_grid(surface, width, ground_line, tuning.grid_color);

    let player = &view.world.player;
    surface.fill_rect(player.rect(), player.color, Some(Rgb::WHITE));
    for obstacle in &view.world.obstacles {
        surface.fill_rect(obstacle.rect, obstacle.color, Some(Rgb::WHITE));
    }

    let score = view.world.score.score();
    match view.run_state {
        RunState::Ended => draw_overlay(
            surface,
            view.viewport,
            "GAME OVER",
            &format!("Final score: {}", score),
        ),
        RunState::Paused => draw_overlay(
            surface,
            view.viewport,
            "PAUSED",
            "Press space to continue",
        ),
        RunState::NotStarted | RunState::Running => {}
    }
}

/// Dotted pixel grid above the ground
fn draw_grid<S: RenderSurface + ?Sized>(surface: &mut S, width: f32, ground_line: f32, color: Rgb) {
    if width <= 0.0 || ground_line <= 0.0 {
        return;
    }
    let step = GRID_SPACING as usize;
    for x in (0..width.ceil() as u32).step_by(step) {
        for y in (0..ground_line.ceil() as u32).step_by(step) {
            if (x + y) % (2 * GRID_SPACING) == 0 {
                surface.fill_rect(Rect::new(x as f32, y as f32, 1.0, 1.0), color, None);
            }
        }
    }
}

fn draw_overlay<S: RenderSurface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
    title: &str,
    detail: &str,
) {
    let Viewport { width, height } = viewport;
    surface.shade(Rect::new(0.0, 0.0, width, height), Rgb::BLACK, OVERLAY_ALPHA);
    surface.draw_text(
        title,
        width / 2.0 - 80.0,
        height / 2.0 - 20.0,
        Rgb::WHITE,
        TITLE_TEXT_SIZE,
    );
    surface.draw_text(
        detail,
        width / 2.0 - 100.0,
        height / 2.0 + 20.0,
        Rgb::WHITE,
        DETAIL_TEXT_SIZE,
    );
}
