//! Data-driven game balance
//!
//! Every GeometryJumper constant lives here so a page can override them with
//! a JSON blob. Missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::{MAX_FRAME_DELTA_MS, PHYSICS_STEP_MS};
use crate::sim::GapRange;

/// Tunable parameters for a jumper session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per nominal step
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_force: f32,
    /// Horizontal scroll per nominal step
    pub scroll_speed: f32,
    /// Nominal physics step duration (ms)
    pub physics_step_ms: f64,
    /// Frame deltas above this are clamped (ms)
    pub max_frame_delta_ms: f64,

    // === Obstacles ===
    /// Spawn probability per nominal step
    pub obstacle_frequency: f32,
    /// Maximum number of live obstacles
    pub max_obstacles: usize,
    /// Minimum distance travelled between spawns
    pub min_obstacle_distance: f64,
    /// Probability of picking the tight gap range
    pub tight_gap_chance: f32,
    /// Gap range for packed clusters
    pub tight_gap: GapRange,
    /// Gap range for isolated obstacles
    pub loose_gap: GapRange,

    // === Layout ===
    /// Height of the ground strip at the bottom of the viewport
    pub ground_height: f32,
    /// Fixed horizontal player position
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Palette ===
    pub player_color: Rgb,
    pub obstacle_color: Rgb,
    pub background_color: Rgb,
    pub ground_color: Rgb,
    pub grid_color: Rgb,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.4,
            jump_force: -12.0,
            scroll_speed: 5.0,
            physics_step_ms: PHYSICS_STEP_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,

            obstacle_frequency: 0.01,
            max_obstacles: 5,
            min_obstacle_distance: 300.0,
            tight_gap_chance: 0.3,
            tight_gap: GapRange::new(1, 10),
            loose_gap: GapRange::new(300, 900),

            ground_height: 50.0,
            player_x: 50.0,
            player_width: 30.0,
            player_height: 30.0,

            player_color: Rgb::new(0x5d, 0x73, 0xb0),
            obstacle_color: Rgb::new(0x5d, 0x9d, 0xb0),
            background_color: Rgb::new(0xe6, 0xf7, 0xff),
            ground_color: Rgb::new(0xb3, 0xd9, 0xff),
            grid_color: Rgb::new(0xd6, 0xee, 0xff),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse a JSON override, falling back to defaults when it is malformed
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring malformed tuning: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Clamp values that would break the simulation invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.physics_step_ms.is_nan() || self.physics_step_ms <= 0.0 {
            self.physics_step_ms = defaults.physics_step_ms;
        }
        if self.max_frame_delta_ms.is_nan() || self.max_frame_delta_ms <= 0.0 {
            self.max_frame_delta_ms = defaults.max_frame_delta_ms;
        }
        self.obstacle_frequency = self.obstacle_frequency.clamp(0.0, 1.0);
        self.tight_gap_chance = self.tight_gap_chance.clamp(0.0, 1.0);
        self.scroll_speed = self.scroll_speed.max(0.0);
        self.min_obstacle_distance = self.min_obstacle_distance.max(0.0);
        self.ground_height = self.ground_height.max(0.0);
        self.player_width = self.player_width.max(1.0);
        self.player_height = self.player_height.max(1.0);
        self.tight_gap = self.tight_gap.ordered();
        self.loose_gap = self.loose_gap.ordered();
        self
    }
}
