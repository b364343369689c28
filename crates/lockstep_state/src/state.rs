//! The process-wide persistent state container

use crate::inventory::{Inventory, KeyColor};
use crate::progress::{DoorFlag, KeyFlag};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything that survives a scene reload: the key slot plus the
/// authoritative key/door progress maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistentState {
    /// The single-slot key inventory
    pub inventory: Inventory,
    /// Key progress by stable id
    keys: HashMap<String, KeyFlag>,
    /// Door progress by stable id
    doors: HashMap<String, DoorFlag>,
}

impl PersistentState {
    /// Create an empty state (process start)
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key id the first time a scene mentions it. Re-registering
    /// on a revisit keeps the existing flag untouched.
    pub fn register_key(&mut self, id: &str, color: KeyColor) {
        self.keys
            .entry(id.to_owned())
            .or_insert_with(|| KeyFlag::new(color));
    }

    /// Register a door id; idempotent across scene revisits
    pub fn register_door(&mut self, id: &str, color: KeyColor) {
        self.doors
            .entry(id.to_owned())
            .or_insert_with(|| DoorFlag::new(color));
    }

    /// Whether a key has been collected in this process run
    pub fn key_collected(&self, id: &str) -> bool {
        self.keys.get(id).map(|k| k.collected).unwrap_or(false)
    }

    /// Whether a door has been opened in this process run
    pub fn door_open(&self, id: &str) -> bool {
        self.doors.get(id).map(|d| d.is_open).unwrap_or(false)
    }

    /// Look up a key flag
    pub fn key(&self, id: &str) -> Option<&KeyFlag> {
        self.keys.get(id)
    }

    /// Look up a door flag
    pub fn door(&self, id: &str) -> Option<&DoorFlag> {
        self.doors.get(id)
    }

    /// Mark a key collected and move its color into the inventory slot.
    /// Monotonic; collecting an already-collected key is a no-op.
    pub fn collect_key(&mut self, id: &str) -> Option<KeyColor> {
        let flag = self.keys.get_mut(id)?;
        if !flag.collected {
            flag.collected = true;
            self.inventory.pick_up(flag.color);
        }
        Some(flag.color)
    }

    /// Mark a door open. Monotonic for the process lifetime.
    pub fn open_door(&mut self, id: &str) -> bool {
        match self.doors.get_mut(id) {
            Some(flag) => {
                flag.is_open = true;
                true
            }
            None => false,
        }
    }
}
