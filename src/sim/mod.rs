//! GeometryJumper simulation module
//!
//! All gameplay logic lives here. This module must stay free of browser and
//! rendering dependencies:
//! - Time enters only as a frame delta in milliseconds
//! - Randomness only through a caller-supplied RNG
//! - Obstacles iterate in spawn order

pub mod collision;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, aabb_overlap};
pub use score::{ScoreTracker, score_for};
pub use spawn::{maybe_spawn, spawn_group};
pub use state::{GapKind, GapRange, Obstacle, Player, RunState, Viewport, World};
pub use tick::{StepOutcome, step, time_scale};
