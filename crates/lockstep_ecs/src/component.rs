//! Generic component storage

use crate::entity::Entity;
use std::collections::HashMap;

/// A mapping from entity to component value. One table exists per component
/// type; an entity missing from the table simply does not have the component.
#[derive(Debug, Clone)]
pub struct ComponentTable<T> {
    entries: HashMap<Entity, T>,
}

impl<T> ComponentTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the component for an entity
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.entries.insert(entity, component)
    }

    /// Remove the component from an entity
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.entries.remove(&entity)
    }

    /// Get a component reference
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.entries.get(&entity)
    }

    /// Get a mutable component reference
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.entries.get_mut(&entity)
    }

    /// Check for presence
    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains_key(&entity)
    }

    /// Iterate over (entity, component) pairs
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entries.iter().map(|(e, c)| (*e, c))
    }

    /// Iterate mutably over (entity, component) pairs
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entries.iter_mut().map(|(e, c)| (*e, c))
    }

    /// Entities with this component
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.keys().copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
