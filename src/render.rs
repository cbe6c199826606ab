//! The draw-call seam between the simulation and an external renderer
//!
//! Rasterization, sprite decoding and text layout all live on the other side
//! of [`RenderSink`]. The engine emits one `draw_sprite` per live entity in
//! registry order (later insertions draw on top) followed by a single `hud`
//! call, once per tick and once per explicit repaint while paused or ended.

use glam::Vec2;

use crate::sim::{GamePhase, SpriteId};

/// Heads-up-display state for the frame: everything the renderer needs to
/// draw overlay text ("PAUSED", "GAME OVER", title, score).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    /// Current phase, so the renderer can pick the overlay
    pub phase: GamePhase,
    /// Current (or final) score
    pub score: u64,
    /// Aliens still alive, for optional HUD detail
    pub aliens_left: u32,
}

/// Receiver for one frame's worth of draw requests. Fire-and-forget: the
/// engine never waits on the renderer.
pub trait RenderSink {
    /// Draw the sprite with its top-left corner at `pos`. `sprite` is an
    /// opaque handle resolved by the host; the engine never interprets it.
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2);

    /// Frame epilogue carrying overlay/HUD state.
    fn hud(&mut self, hud: &Hud);
}

/// Sink that discards everything. Useful for headless drivers and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_sprite(&mut self, _sprite: SpriteId, _pos: Vec2) {}
    fn hud(&mut self, _hud: &Hud) {}
}
