//! Single-slot key inventory

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color identity shared by keys and the doors they open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl KeyColor {
    /// Display name used in player-facing messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
        }
    }
}

impl fmt::Display for KeyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The player's key slot. At most one key is held at a time; picking up a
/// new key overwrites the held one (no stacking).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    held_key: Option<KeyColor>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently held key color, if any
    pub fn held_key(&self) -> Option<KeyColor> {
        self.held_key
    }

    /// Check whether a key of the given color is held
    pub fn holds(&self, color: KeyColor) -> bool {
        self.held_key == Some(color)
    }

    /// Put a key in the slot, returning whatever it replaced
    pub fn pick_up(&mut self, color: KeyColor) -> Option<KeyColor> {
        self.held_key.replace(color)
    }
}
