//! Game state and core simulation types
//!
//! The world is everything the physics step touches. Run state and timing
//! belong to the session that owns it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::score::ScoreTracker;
use crate::color::Rgb;
use crate::tuning::Tuning;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Waiting for the first start
    #[default]
    NotStarted,
    /// Frames are being stepped and rendered
    Running,
    /// Stepping suspended, waiting for an explicit resume
    Paused,
    /// Player hit an obstacle; terminal until restart
    Ended,
}

/// Drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Y of the ground surface
    #[inline]
    pub fn ground_line(&self, ground_height: f32) -> f32 {
        self.height - ground_height
    }

    /// Player y when standing on the ground (never above the top edge)
    #[inline]
    pub fn rest_y(&self, ground_height: f32, player_height: f32) -> f32 {
        (self.ground_line(ground_height) - player_height).max(0.0)
    }
}

/// Inclusive range of horizontal spacing between obstacle groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRange {
    pub min: i32,
    pub max: i32,
}

impl GapRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Same range with `min <= max`
    pub fn ordered(self) -> Self {
        Self {
            min: self.min.min(self.max),
            max: self.min.max(self.max),
        }
    }
}

/// Which gap range a spawn drew from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapKind {
    /// Packed cluster of 2-3 narrow obstacles
    Tight,
    /// One isolated obstacle
    Loose,
}

impl GapKind {
    pub fn range(self, tuning: &Tuning) -> GapRange {
        match self {
            GapKind::Tight => tuning.tight_gap,
            GapKind::Loose => tuning.loose_gap,
        }
    }
}

/// The player's box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity per nominal step (positive is down)
    pub velocity_y: f32,
    /// Set while off the ground; blocks a second jump
    pub airborne: bool,
    pub color: Rgb,
}

impl Player {
    /// Player standing on the ground
    pub fn new(tuning: &Tuning, viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(
                tuning.player_x,
                viewport.rest_y(tuning.ground_height, tuning.player_height),
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            velocity_y: 0.0,
            airborne: false,
            color: tuning.player_color,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Start a jump unless already in the air
    ///
    /// Returns whether the jump happened.
    pub fn jump(&mut self, jump_force: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.velocity_y = jump_force;
        self.airborne = true;
        true
    }

    /// Apply gravity for `time_scale` nominal steps and resolve ground/ceiling
    pub fn integrate(&mut self, gravity: f32, time_scale: f32, rest_y: f32) {
        self.velocity_y += gravity * time_scale;
        self.pos.y += self.velocity_y * time_scale;

        if self.pos.y < 0.0 {
            // Hit the top of the viewport
            self.pos.y = 0.0;
            self.velocity_y = self.velocity_y.max(0.0);
        }

        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.velocity_y = 0.0;
            self.airborne = false;
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub color: Rgb,
}

impl Obstacle {
    /// Obstacle of the given size whose bottom sits on `ground_line`
    pub fn on_ground(x: f32, width: f32, height: f32, ground_line: f32, color: Rgb) -> Self {
        Self {
            rect: Rect::new(x, ground_line - height, width, height),
            color,
        }
    }

    /// Whether the right edge has passed the left edge of the viewport
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

/// Everything the physics step mutates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Distance and derived score
    pub score: ScoreTracker,
    /// Distance at the most recent spawn (`None` before the first one)
    pub last_spawn_distance: Option<f64>,
}

impl World {
    pub fn new(tuning: &Tuning, viewport: &Viewport) -> Self {
        Self {
            player: Player::new(tuning, viewport),
            obstacles: Vec::new(),
            score: ScoreTracker::default(),
            last_spawn_distance: None,
        }
    }

    /// Cumulative distance travelled this run
    #[inline]
    pub fn distance(&self) -> f64 {
        self.score.distance()
    }

    /// Put the player back on the ground after a viewport change
    pub fn settle_player(&mut self, tuning: &Tuning, viewport: &Viewport) {
        self.player.pos.y = viewport.rest_y(tuning.ground_height, self.player.size.y);
        self.player.velocity_y = 0.0;
        self.player.airborne = false;
    }

    /// Keep a mid-air player inside a resized viewport
    pub fn clamp_player(&mut self, tuning: &Tuning, viewport: &Viewport) {
        let rest_y = viewport.rest_y(tuning.ground_height, self.player.size.y);
        self.player.pos.y = self.player.pos.y.clamp(0.0, rest_y);
    }

    /// Re-anchor a run in progress to a resized viewport
    ///
    /// Obstacles follow the ground line. A grounded player stays grounded;
    /// an airborne one keeps its height inside the new bounds.
    pub fn refit(&mut self, tuning: &Tuning, old: &Viewport, new: &Viewport) {
        let shift = new.ground_line(tuning.ground_height) - old.ground_line(tuning.ground_height);
        for obstacle in &mut self.obstacles {
            obstacle.rect.pos.y += shift;
        }
        if self.player.airborne {
            self.clamp_player(tuning, new);
        } else {
            self.settle_player(tuning, new);
        }
    }
}
