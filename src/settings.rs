//! Game tuning and balance
//!
//! Every gameplay number the simulation consumes lives in [`Tuning`], so a
//! host can rebalance the game from a JSON file without touching engine code.
//! Defaults reproduce the classic layout from `consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven gameplay parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Playfield ===
    /// Playfield width in pixels
    pub screen_width: f32,
    /// Playfield height in pixels
    pub screen_height: f32,

    // === Ship ===
    /// Ship speed while a movement intent is held (pixels/sec)
    pub ship_speed: f32,
    /// Ship spawn position
    pub ship_start: Vec2,
    /// Ship bounding box (derived from the sprite by the host; the engine
    /// only uses it for collision and clamping)
    pub ship_size: Vec2,

    // === Aliens ===
    /// Shared horizontal speed at spawn (pixels/sec)
    pub alien_speed: f32,
    /// Per-kill speed multiplier for every surviving alien
    pub alien_speedup: f32,
    /// Vertical drop per sweep reversal (pixels)
    pub alien_drop: f32,
    /// An alien crossing this line means the humans lose
    pub territory_line: f32,
    /// Grid rows
    pub alien_rows: u32,
    /// Grid columns
    pub alien_cols: u32,
    /// Top-left anchor of the grid
    pub alien_grid_origin: Vec2,
    /// Horizontal/vertical spacing between grid slots
    pub alien_spacing: Vec2,
    /// Alien bounding box
    pub alien_size: Vec2,

    // === Shots ===
    /// Upward shot speed (pixels/sec)
    pub shot_speed: f32,
    /// Minimum time between shots (ms)
    pub firing_interval_ms: f64,
    /// Spawn offset relative to the ship position
    pub shot_offset: Vec2,
    /// Shot bounding box
    pub shot_size: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            ship_speed: SHIP_MOVE_SPEED,
            ship_start: Vec2::new(SHIP_START_X, SHIP_START_Y),
            ship_size: Vec2::new(40.0, 24.0),

            alien_speed: ALIEN_BASE_SPEED,
            alien_speedup: ALIEN_SPEEDUP,
            alien_drop: ALIEN_DROP,
            territory_line: TERRITORY_LINE,
            alien_rows: ALIEN_ROWS,
            alien_cols: ALIEN_COLS,
            alien_grid_origin: Vec2::new(ALIEN_GRID_X, ALIEN_GRID_Y),
            alien_spacing: Vec2::new(ALIEN_SPACING_X, ALIEN_SPACING_Y),
            alien_size: Vec2::new(36.0, 22.0),

            shot_speed: SHOT_SPEED,
            firing_interval_ms: FIRING_INTERVAL_MS,
            shot_offset: Vec2::new(SHOT_OFFSET_X, SHOT_OFFSET_Y),
            shot_size: Vec2::new(6.0, 14.0),
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize tuning to pretty JSON (for writing a template file)
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
