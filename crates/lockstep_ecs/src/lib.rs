//! # lockstep_ecs - Entity registry and component tables
//!
//! Entities are opaque monotonically-allocated ids; all state lives in
//! per-type component tables keyed by entity. Absence of a table entry means
//! "entity does not have this component" - there are no null sentinels.
//!
//! Storage is deliberately simple: parallel maps, one per component type,
//! owned by a single [`Registry`]. Entities live only for the duration of
//! one scene; `Registry::clear` is the sole bulk-destruction path and runs
//! on every scene transition.

pub mod component;
pub mod components;
pub mod entity;
pub mod registry;

pub use component::ComponentTable;
pub use components::{
    Collectible, Interactable, MeshHandle, Platform, Player, Renderable, WinCondition,
};
pub use entity::{Entity, EntityAllocator};
pub use registry::Registry;
