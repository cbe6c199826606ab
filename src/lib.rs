//! Space Invaders - a grid-invaders arcade simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state machine)
//! - `render`: The draw-call seam toward an external renderer
//! - `settings`: Data-driven game tuning
//!
//! The engine owns no window, no sprites and no timer. An external driver
//! calls [`sim::tick`] at a fixed cadence while the game is running, an input
//! collaborator latches intents on [`sim::Game`], and a renderer receives one
//! draw request per live entity through [`render::RenderSink`].

pub mod render;
pub mod settings;
pub mod sim;

pub use render::{Hud, NullSink, RenderSink};
pub use settings::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Interval between driver ticks (ms). The engine itself only sees the
    /// elapsed delta, but the demo driver and the score balance assume this.
    pub const TICK_INTERVAL_MS: f64 = 100.0;

    /// Player ship speed (pixels/sec) while a movement intent is held
    pub const SHIP_MOVE_SPEED: f32 = 300.0;

    /// Alien base horizontal speed at spawn (pixels/sec, uniform)
    pub const ALIEN_BASE_SPEED: f32 = 75.0;
    /// Per-kill multiplier applied to every surviving alien's speed
    pub const ALIEN_SPEEDUP: f32 = 1.02;
    /// Vertical drop applied to every alien on a sweep reversal (pixels)
    pub const ALIEN_DROP: f32 = 10.0;
    /// An alien whose bottom edge passes this line has reached the humans
    pub const TERRITORY_LINE: f32 = 570.0;

    /// Alien grid layout: rows x cols anchored at (origin_x, origin_y)
    pub const ALIEN_ROWS: u32 = 5;
    pub const ALIEN_COLS: u32 = 12;
    pub const ALIEN_GRID_X: f32 = 100.0;
    pub const ALIEN_GRID_Y: f32 = 50.0;
    pub const ALIEN_SPACING_X: f32 = 50.0;
    pub const ALIEN_SPACING_Y: f32 = 30.0;

    /// Shot speed upward (pixels/sec)
    pub const SHOT_SPEED: f32 = 300.0;
    /// Minimum time between player shots (ms)
    pub const FIRING_INTERVAL_MS: f64 = 500.0;
    /// Shot spawn offset from the ship's top-left corner
    pub const SHOT_OFFSET_X: f32 = 10.0;
    pub const SHOT_OFFSET_Y: f32 = -30.0;

    /// Ship spawn position (roughly bottom center)
    pub const SHIP_START_X: f32 = 370.0;
    pub const SHIP_START_Y: f32 = 550.0;

    /// Score is zero once a session drags past this many ticks
    pub const SCORE_ITERATION_LIMIT: u64 = 500;
    /// Points per tick of headroom under the iteration limit
    pub const SCORE_PER_ITERATION: u64 = 500;
}
