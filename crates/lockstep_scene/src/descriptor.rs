//! Declarative scene descriptors
//!
//! Descriptors are static configuration data, not a user-facing file
//! format. They are immutable once constructed; the builder reads them and
//! never writes back.

use crate::error::{Result, SceneError};
use lockstep_math::Vec3;
use lockstep_state::KeyColor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One platform's placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlatformDesc {
    /// Center position
    pub position: Vec3,
    /// Full extents of the box
    pub size: Vec3,
}

/// One key's placement and identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDesc {
    /// Stable id into the persistent key map
    pub id: String,
    /// Color granted on collection
    pub color: KeyColor,
    /// Position
    pub position: Vec3,
}

/// One door's placement and identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorDesc {
    /// Stable id into the persistent door map
    pub id: String,
    /// Key color required to open
    pub color: KeyColor,
    /// Center position
    pub position: Vec3,
    /// Full extents of the door slab
    pub size: Vec3,
}

/// Declarative description of one level's initial layout. A descriptor with
/// zero platforms or collectibles is a legal degenerate scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Where the player spawns
    pub player_start: Vec3,
    /// Where the win condition sits
    pub win_position: Vec3,
    /// Collectible positions (always rebuilt fresh, never persisted)
    #[serde(default)]
    pub collectibles: Vec<Vec3>,
    /// Platforms
    #[serde(default)]
    pub platforms: Vec<PlatformDesc>,
    /// Keys
    #[serde(default)]
    pub keys: Vec<KeyDesc>,
    /// Doors
    #[serde(default)]
    pub doors: Vec<DoorDesc>,
}

impl SceneDescriptor {
    /// Create an empty scene with just a spawn and a win position
    pub fn new(player_start: Vec3, win_position: Vec3) -> Self {
        Self {
            player_start,
            win_position,
            collectibles: Vec::new(),
            platforms: Vec::new(),
            keys: Vec::new(),
            doors: Vec::new(),
        }
    }

    /// Key and door ids mentioned by this descriptor
    pub fn object_ids(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .map(|k| k.id.as_str())
            .chain(self.doors.iter().map(|d| d.id.as_str()))
    }

    /// Fail fast when a key/door id appears twice within this descriptor
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in self.object_ids() {
            if !seen.insert(id) {
                return Err(SceneError::DuplicateObjectId(id.to_owned()));
            }
        }
        Ok(())
    }
}

/// Fail fast when a key/door id appears twice anywhere in a scene set.
/// Ids name persistent world objects, so sharing one between two distinct
/// objects would silently merge their state.
pub fn validate_scene_set(scenes: &[SceneDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for scene in scenes {
        for id in scene.object_ids() {
            if !seen.insert(id) {
                return Err(SceneError::DuplicateObjectId(id.to_owned()));
            }
        }
    }
    Ok(())
}
