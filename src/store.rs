//! Entity store: the single owner of every live canvas entity.
//!
//! Entities are kept in insertion order. That order is the "store order" the
//! combination coordinator scans for collisions, so the first-match tie-break
//! is deterministic. Draw order is a separate view sorted by z-order.
//!
//! Z-order is allocated as `max(existing) + 1` (or `0` for an empty store),
//! both when an entity is added and when it is brought to the front, so values
//! stay unique among live entities and the newest focus is always on top.
//!
//! The store is not shared: it lives inside the engine and is only touched
//! from the loop that owns the engine.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::entity::{Entity, EntityId};

/// In-memory store of canvas entities.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { entities: Vec::new() }
    }

    /// Insert an entity on top of everything else. Returns its id.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        entity.set_z_order(self.next_z_order());
        let id = entity.id();
        self.entities.push(entity);
        id
    }

    /// Remove an entity by id, returning it if it was present.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == *id)?;
        Some(self.entities.remove(index))
    }

    /// Remove every entity. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entities.len();
        self.entities.clear();
        count
    }

    /// Raise an entity above all others. Returns false if the id is unknown.
    pub fn bring_to_front(&mut self, id: &EntityId) -> bool {
        let z = self.next_z_order();
        let Some(entity) = self.get_mut(id) else {
            return false;
        };
        entity.set_z_order(z);
        true
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == *id)
    }

    pub(crate) fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    /// All entities sorted by ascending z-order (draw order, bottom first).
    #[must_use]
    pub fn all(&self) -> Vec<&Entity> {
        let mut sorted: Vec<&Entity> = self.entities.iter().collect();
        sorted.sort_by_key(|e| e.z_order());
        sorted
    }

    /// Entity ids sorted by descending z-order (input priority, topmost first).
    #[must_use]
    pub fn ids_top_down(&self) -> Vec<EntityId> {
        let mut sorted = self.all();
        sorted.reverse();
        sorted.into_iter().map(Entity::id).collect()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// The entity currently being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<EntityId> {
        self.entities.iter().find(|e| e.is_dragging()).map(Entity::id)
    }

    /// Highest z-order in use, or `None` when the store is empty.
    #[must_use]
    pub fn max_z_order(&self) -> Option<i64> {
        self.entities.iter().map(Entity::z_order).max()
    }

    /// Number of entities currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the store contains no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn next_z_order(&self) -> i64 {
        self.max_z_order().map_or(0, |z| z + 1)
    }
}
