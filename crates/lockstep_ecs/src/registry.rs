//! The entity registry: allocator plus one table per component type

use crate::component::ComponentTable;
use crate::components::{
    Collectible, Interactable, Platform, Player, Renderable, WinCondition,
};
use crate::entity::{Entity, EntityAllocator};
use lockstep_math::Transform;

/// Owns entity identity and every gameplay component table. Tables are
/// independent parallel maps; no component stores a back-reference implying
/// ownership of the entity.
#[derive(Debug, Default)]
pub struct Registry {
    allocator: EntityAllocator,
    /// Spatial state + cached world matrix
    pub transforms: ComponentTable<Transform>,
    /// Drawable entities
    pub renderables: ComponentTable<Renderable>,
    /// Scene-local pickups
    pub collectibles: ComponentTable<Collectible>,
    /// Keys and doors
    pub interactables: ComponentTable<Interactable>,
    /// Standable surfaces for the grounded heuristic
    pub platforms: ComponentTable<Platform>,
    /// Scene exit triggers
    pub win_conditions: ComponentTable<WinCondition>,
    /// Player markers
    pub players: ComponentTable<Player>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity. Ids are never reused, even across `clear`.
    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// The player-tagged entity, if one exists
    pub fn player(&self) -> Option<Entity> {
        self.players.entities().next()
    }

    /// Empty every component table. This is the only bulk-destruction path;
    /// it runs on scene transition. The allocator is left alone so retired
    /// ids stay retired.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.renderables.clear();
        self.collectibles.clear();
        self.interactables.clear();
        self.platforms.clear();
        self.win_conditions.clear();
        self.players.clear();
    }

    /// True when no table holds any entry
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.renderables.is_empty()
            && self.collectibles.is_empty()
            && self.interactables.is_empty()
            && self.platforms.is_empty()
            && self.win_conditions.is_empty()
            && self.players.is_empty()
    }
}
