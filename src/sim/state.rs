//! Game session state and the state machine driving it
//!
//! A [`Game`] owns the entity registry, the per-session bookkeeping and the
//! current [`GamePhase`]. External collaborators reach it three ways: latched
//! intents on [`Game::input`], the edge-triggered commands
//! [`Game::new_game`] / [`Game::toggle_pause`], and [`super::tick::tick`]
//! driven at a fixed cadence while the phase is `Running`.

use crate::consts::{SCORE_ITERATION_LIMIT, SCORE_PER_ITERATION};
use crate::render::{Hud, RenderSink};
use crate::settings::Tuning;

use super::entity::{Entity, EntityId};
use super::registry::Registry;

use glam::Vec2;

/// Current phase of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session yet; title screen
    Idle,
    /// Ticks are being driven
    Running,
    /// Ticks suspended, entities frozen
    Paused,
    /// Terminal win/loss display; re-enterable only via `new_game`
    Ended { won: bool },
}

/// Latched input intents, mutated asynchronously by the input collaborator
/// and sampled once per tick. Left and right are independent booleans; the
/// tie-break (both held means stand still) is resolved at sampling time, so
/// no atomicity across the pair is required.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputLatch {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Per-session bookkeeping, reset wholesale on `new_game`
#[derive(Debug, Clone)]
pub struct Session {
    /// Aliens still alive; zero means the player has won
    pub alien_count: u32,
    /// Set when an alien reaches the humans' territory or hits the ship
    pub humans_dead: bool,
    /// Elapsed ticks this session; drives the score
    pub iterations: u64,
    /// Accumulated simulated time (ms), fed by tick deltas
    pub clock_ms: f64,
    /// Sim-clock timestamp of the last shot, for the fire debounce
    pub last_fire_ms: Option<f64>,
    /// Some event this tick asked for a deferred logic pass
    pub logic_requested: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            alien_count: 0,
            humans_dead: false,
            iterations: 0,
            clock_ms: 0.0,
            last_fire_ms: None,
            logic_requested: false,
        }
    }
}

/// Notification handed to the host when a session terminates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub won: bool,
    pub score: u64,
}

/// One game: registry + session + phase + tuning.
///
/// Ticks take `&mut Game`, so tick overlap (a fatal driver bug per the
/// scheduling contract) is unrepresentable in safe code; a multi-threaded
/// driver has to serialize access to the `Game` value itself.
#[derive(Debug, Clone)]
pub struct Game {
    pub phase: GamePhase,
    pub registry: Registry,
    pub session: Session,
    pub input: InputLatch,
    pub tuning: Tuning,
    pub(crate) ship_id: EntityId,
}

impl Game {
    /// A fresh engine in the idle (title) phase, with no session
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            registry: Registry::new(),
            session: Session::default(),
            input: InputLatch::default(),
            tuning,
            ship_id: EntityId(0),
        }
    }

    /// Start a fresh session: ship plus the alien grid, session state and
    /// latched input reset wholesale. Legal from any phase and always wins
    /// immediately, abandoning any in-flight session.
    pub fn new_game(&mut self) {
        self.reset_entities();
        self.session = Session {
            alien_count: self.tuning.alien_rows * self.tuning.alien_cols,
            ..Session::default()
        };
        self.input = InputLatch::default();
        self.phase = GamePhase::Running;
        log::info!(
            "new game: {} aliens, ship at {}",
            self.session.alien_count,
            self.tuning.ship_start
        );
    }

    /// Toggle between `Running` and `Paused`. Ignored in `Idle`/`Ended`;
    /// pause is only meaningful while a session is live.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                log::info!("paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                log::info!("resumed");
            }
            GamePhase::Idle | GamePhase::Ended { .. } => {
                log::debug!("pause ignored in phase {:?}", self.phase);
            }
        }
    }

    /// Current score. Quick sessions score high; anything past the iteration
    /// limit is worth nothing.
    pub fn score(&self) -> u64 {
        if self.session.iterations > SCORE_ITERATION_LIMIT {
            0
        } else {
            (SCORE_ITERATION_LIMIT - self.session.iterations) * SCORE_PER_ITERATION
        }
    }

    /// HUD state for the renderer's overlay text
    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.phase,
            score: self.score(),
            aliens_left: self.session.alien_count,
        }
    }

    /// Emit a full frame outside of a tick, e.g. to repaint the paused or
    /// game-over overlay. Same draw order as a tick: registry order, then HUD.
    pub fn redraw<S: RenderSink>(&self, sink: &mut S) {
        for entity in self.registry.iter() {
            sink.draw_sprite(entity.sprite, entity.pos);
        }
        sink.hud(&self.hud());
    }

    /// Rebuild the entity population for a fresh session: the player ship,
    /// then the alien grid row by row (aliens therefore draw above the ship
    /// sprite, matching insertion order).
    fn reset_entities(&mut self) {
        self.registry.clear();

        let ship_id = self.registry.next_entity_id();
        self.registry.add(Entity::ship(ship_id, &self.tuning));
        self.ship_id = ship_id;

        for row in 0..self.tuning.alien_rows {
            for col in 0..self.tuning.alien_cols {
                let pos = self.tuning.alien_grid_origin
                    + Vec2::new(
                        col as f32 * self.tuning.alien_spacing.x,
                        row as f32 * self.tuning.alien_spacing.y,
                    );
                let id = self.registry.next_entity_id();
                self.registry.add(Entity::alien(id, pos, &self.tuning));
            }
        }
    }
}
