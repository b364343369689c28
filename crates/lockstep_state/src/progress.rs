//! World-object progress flags
//!
//! Keys and doors are identified by stable string ids. The flags here are
//! authoritative: in-scene entities are projections of them, and the scene
//! builder consults them to omit already-consumed objects on every rebuild.

use crate::inventory::KeyColor;
use serde::{Deserialize, Serialize};

/// Progress flag for a key object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFlag {
    /// Color granted when collected
    pub color: KeyColor,
    /// Once true, never reverts; collected keys are omitted from builds
    pub collected: bool,
}

impl KeyFlag {
    /// A fresh, uncollected key flag
    pub fn new(color: KeyColor) -> Self {
        Self {
            color,
            collected: false,
        }
    }
}

/// Progress flag for a door object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorFlag {
    /// Color of key required to open
    pub color: KeyColor,
    /// Once true, the opening is permanent for the process lifetime
    pub is_open: bool,
}

impl DoorFlag {
    /// A fresh, closed door flag
    pub fn new(color: KeyColor) -> Self {
        Self {
            color,
            is_open: false,
        }
    }
}
