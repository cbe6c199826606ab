//! Game entities and their per-variant behavior
//!
//! An [`Entity`] is a moving, drawable, collidable object. Instead of a class
//! hierarchy, behavior is dispatched over the [`EntityKind`] tag: movement
//! rules in [`Entity::advance`], collision reactions in
//! [`Entity::collided_with`] and deferred game logic in [`Entity::do_logic`].

use glam::Vec2;

use super::collision::Aabb;
use crate::settings::Tuning;

/// Stable handle of a live entity. Ids are allocated monotonically by the
/// registry and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Opaque sprite resource handle, resolved by the host renderer. The engine
/// never interprets it beyond passing it along with each draw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

impl SpriteId {
    pub const SHIP: SpriteId = SpriteId(0);
    pub const ALIEN: SpriteId = SpriteId(1);
    pub const SHOT: SpriteId = SpriteId(2);
}

/// Entity variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Alien,
    Shot,
}

/// Variant-specific outcome of one movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    None,
    /// An alien touched a horizontal playfield bound; a logic pass is due
    EdgeContact,
    /// A shot left the playfield vertically and should be removed
    LeftPlayfield,
}

/// Variant-specific reaction to a collision, produced by
/// [`Entity::collided_with`] and applied by the tick after the pairwise scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    /// A shot struck an alien: both disappear and the kill is counted
    AlienKilled { shot: EntityId, alien: EntityId },
    /// An alien made contact with the player's ship
    ShipHit { ship: EntityId },
}

/// Variant-specific outcome of a deferred logic pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicEvent {
    None,
    /// An alien descended past the territory line; the humans lose
    ReachedTerritory,
}

/// A simulated game object
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub sprite: SpriteId,
    /// Top-left corner, sub-pixel precision
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Bounding box extent, derived from the sprite by the host
    pub size: Vec2,
}

impl Entity {
    /// The player ship at its spawn position
    pub fn ship(id: EntityId, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: EntityKind::Ship,
            sprite: SpriteId::SHIP,
            pos: tuning.ship_start,
            vel: Vec2::ZERO,
            size: tuning.ship_size,
        }
    }

    /// An alien sweeping left at the shared base speed
    pub fn alien(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: EntityKind::Alien,
            sprite: SpriteId::ALIEN,
            pos,
            vel: Vec2::new(-tuning.alien_speed, 0.0),
            size: tuning.alien_size,
        }
    }

    /// A player shot travelling straight up
    pub fn shot(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: EntityKind::Shot,
            sprite: SpriteId::SHOT,
            pos,
            vel: Vec2::new(0.0, -tuning.shot_speed),
            size: tuning.shot_size,
        }
    }

    /// Current bounding box
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Integrate position by `delta_ms` and apply the variant movement rule.
    ///
    /// - Ship: clamped to the horizontal playfield bounds
    /// - Alien: reports edge contact (direction-aware, so a fresh reversal
    ///   does not immediately re-trigger); the reversal itself happens later,
    ///   in the deferred logic pass
    /// - Shot: unclamped; reports when it exits the playfield vertically
    pub fn advance(&mut self, delta_ms: f64, tuning: &Tuning) -> MoveEvent {
        self.pos += self.vel * (delta_ms as f32 / 1000.0);

        match self.kind {
            EntityKind::Ship => {
                let max_x = tuning.screen_width - self.size.x;
                self.pos.x = self.pos.x.clamp(0.0, max_x);
                MoveEvent::None
            }
            EntityKind::Alien => {
                let at_left = self.vel.x < 0.0 && self.pos.x <= 0.0;
                let at_right =
                    self.vel.x > 0.0 && self.pos.x + self.size.x >= tuning.screen_width;
                if at_left || at_right {
                    MoveEvent::EdgeContact
                } else {
                    MoveEvent::None
                }
            }
            EntityKind::Shot => {
                let above = self.pos.y + self.size.y < 0.0;
                let below = self.pos.y > tuning.screen_height;
                if above || below {
                    MoveEvent::LeftPlayfield
                } else {
                    MoveEvent::None
                }
            }
        }
    }

    /// True iff `self` and `other` are distinct entities whose bounding boxes
    /// overlap with non-zero area. Symmetric.
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.id != other.id && self.bounds().overlaps(&other.bounds())
    }

    /// React to a collision with `other`. Dispatched over the variant pair;
    /// both members of a colliding pair get this call-out, each deciding its
    /// own reaction. Same-variant contact is a no-op, as is the mirror order
    /// of a pair whose effect is already carried by the other side.
    pub fn collided_with(&self, other: &Entity) -> Reaction {
        match (self.kind, other.kind) {
            (EntityKind::Shot, EntityKind::Alien) => Reaction::AlienKilled {
                shot: self.id,
                alien: other.id,
            },
            (EntityKind::Ship, EntityKind::Alien) => Reaction::ShipHit { ship: self.id },
            _ => Reaction::None,
        }
    }

    /// Deferred logic, run at most once per tick when some event requested a
    /// logic pass. Aliens reverse their sweep and drop toward the territory
    /// line; ship and shots have no logic.
    pub fn do_logic(&mut self, tuning: &Tuning) -> LogicEvent {
        match self.kind {
            EntityKind::Alien => {
                self.vel.x = -self.vel.x;
                self.pos.y += tuning.alien_drop;
                if self.pos.y + self.size.y >= tuning.territory_line {
                    LogicEvent::ReachedTerritory
                } else {
                    LogicEvent::None
                }
            }
            EntityKind::Ship | EntityKind::Shot => LogicEvent::None,
        }
    }
}
