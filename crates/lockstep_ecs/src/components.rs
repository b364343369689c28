//! Gameplay component definitions

use lockstep_state::KeyColor;
use serde::{Deserialize, Serialize};

/// Opaque reference to an immutable mesh/color resource. Owned by the asset
/// layer; entities only borrow it and never mutate the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// Marks an entity as drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderable {
    /// Mesh resource to draw with the entity's world matrix
    pub mesh: MeshHandle,
}

impl Renderable {
    /// Create a renderable for a mesh
    pub fn new(mesh: MeshHandle) -> Self {
        Self { mesh }
    }
}

/// Proximity-collected pickup. Scene-local: always rebuilt fresh on a scene
/// (re)build, never written to persistent state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Once true, never reverts within this scene instance
    pub collected: bool,
    /// Distance below which pickup fires
    pub trigger_radius: f32,
}

impl Collectible {
    /// A fresh, uncollected collectible
    pub fn new(trigger_radius: f32) -> Self {
        Self {
            collected: false,
            trigger_radius,
        }
    }
}

/// Press-to-interact object, dispatched by tag. The in-scene entity is a
/// projection of the persistent id's current state, not the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Interactable {
    /// A collectable colored key
    Key {
        /// Stable id into the persistent key map
        id: String,
        /// Color granted on collection
        color: KeyColor,
        /// Distance below which interaction is offered
        trigger_radius: f32,
    },
    /// A colored door opened by the matching key
    Door {
        /// Stable id into the persistent door map
        id: String,
        /// Key color required to open
        color: KeyColor,
        /// Distance below which interaction is offered
        trigger_radius: f32,
    },
}

impl Interactable {
    /// Stable persistent-state id
    pub fn id(&self) -> &str {
        match self {
            Self::Key { id, .. } | Self::Door { id, .. } => id,
        }
    }

    /// Color identity of the object
    pub fn color(&self) -> KeyColor {
        match self {
            Self::Key { color, .. } | Self::Door { color, .. } => *color,
        }
    }

    /// Distance below which interaction is offered
    pub fn trigger_radius(&self) -> f32 {
        match self {
            Self::Key { trigger_radius, .. } | Self::Door { trigger_radius, .. } => *trigger_radius,
        }
    }
}

/// Standable surface, used only by the grounded-state heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// World-space Y of the walkable top face
    pub top_surface_y: f32,
}

/// Scene exit trigger. Local to one scene visit; `completed` is always
/// initialized false on build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinCondition {
    /// Guards against duplicate win triggers
    pub completed: bool,
    /// Distance below which the win fires (once all collectibles are taken)
    pub trigger_radius: f32,
}

impl WinCondition {
    /// A fresh win condition for a new scene instance
    pub fn new(trigger_radius: f32) -> Self {
        Self {
            completed: false,
            trigger_radius,
        }
    }
}

/// Marker for the player-controlled entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player;
