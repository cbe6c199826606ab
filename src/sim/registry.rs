//! Entity registry: ordered live entities plus deferred removal
//!
//! Insertion order is draw order and is preserved across removals. Entities
//! are never removed while a scan is in progress; collision reactions only
//! schedule removals, and [`Registry::purge_scheduled`] applies them at one
//! fixed point per tick (after reactions, before the logic pass).

use super::entity::{Entity, EntityId};

/// Owner of all live entities in a session
#[derive(Debug, Default, Clone)]
pub struct Registry {
    /// Live entities, insertion order = draw order
    entities: Vec<Entity>,
    /// Entities to drop at the next purge. Small and deterministic, so a Vec
    /// with a contains-guard beats a hash set here.
    pending: Vec<EntityId>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity id. Ids are never reused within a registry.
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an entity; it draws on top of everything added before it.
    pub fn add(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Mark an entity for removal at the next purge. Idempotent: scheduling
    /// the same entity repeatedly yields exactly one removal.
    pub fn schedule_removal(&mut self, id: EntityId) {
        if !self.pending.contains(&id) {
            self.pending.push(id);
        }
    }

    /// True if `id` is already marked for removal this tick
    pub fn is_pending(&self, id: EntityId) -> bool {
        self.pending.contains(&id)
    }

    /// Drop every pending entity from the live sequence and clear the pending
    /// set. Runs exactly once per tick.
    pub fn purge_scheduled(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        self.entities.retain(|e| !pending.contains(&e.id));
    }

    /// Remove everything, keeping the id allocator running
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Live entities in draw order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Live entities in draw order as a slice, for pairwise index scans
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Live entities not currently marked for removal. Reactions use this so
    /// an entity killed earlier in the same tick is no longer affected.
    pub fn iter_surviving_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        let pending = &self.pending;
        self.entities.iter_mut().filter(move |e| !pending.contains(&e.id))
    }
}
