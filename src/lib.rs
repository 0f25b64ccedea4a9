//! Pixel Arcade - pixel-art browser mini-games
//!
//! Core modules:
//! - `sim`: GeometryJumper simulation (physics, spawning, collisions, score)
//! - `session`: Run state machine and frame scheduling
//! - `renderer`: Render surface abstraction and frame drawing
//! - `platform`: Browser input mapping and animation-frame scheduling
//! - `tuning`: Data-driven game balance
//! - `util`, `color`: Shared random/math and colour helpers

pub mod color;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod util;

pub use color::Rgb;
pub use session::{FrameHandle, FrameScheduler, GameEvent, ManualScheduler, Session};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal physics step (60 steps per second), in milliseconds
    pub const PHYSICS_STEP_MS: f64 = 1000.0 / 60.0;
    /// Longest frame delta applied as a single step
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Distance units per score point
    pub const DISTANCE_PER_POINT: f64 = 10.0;

    /// Spacing of the background pixel grid
    pub const GRID_SPACING: u32 = 10;
    /// Border width drawn around player and obstacles
    pub const BORDER_WIDTH: f32 = 2.0;

    /// Overlay headline text size
    pub const TITLE_TEXT_SIZE: u32 = 24;
    /// Overlay detail text size
    pub const DETAIL_TEXT_SIZE: u32 = 16;
    /// Opacity of the black overlay shade
    pub const OVERLAY_ALPHA: f32 = 0.7;
}
