//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Advancement only through [`tick::tick`] with an explicit elapsed delta
//! - Stable iteration order (registry insertion order is draw order)
//! - No rendering, timing or platform dependencies; the renderer is reached
//!   only through the [`crate::render::RenderSink`] passed into each tick

pub mod collision;
pub mod entity;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use entity::{Entity, EntityId, EntityKind, LogicEvent, MoveEvent, Reaction, SpriteId};
pub use registry::Registry;
pub use state::{Game, GameOutcome, GamePhase, InputLatch, Session};
pub use tick::{tick, try_to_fire};
