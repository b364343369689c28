//! # lockstep_scene - Declarative scenes and the scene builder
//!
//! A [`SceneDescriptor`] is an immutable, flat list of typed object
//! descriptors: player start, win position, collectibles, platforms, keys,
//! doors. [`build`] consumes one together with the persistent gameplay
//! state and populates the entity registry and physics world, omitting
//! keys already collected and doors already opened in a prior visit.
//!
//! Duplicate key/door ids are a configuration error and fail fast before
//! any entity is created - the simulation must never run against an
//! inconsistent registry.

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod meshes;

pub use builder::{build, BuildSettings, BuiltScene};
pub use descriptor::{validate_scene_set, DoorDesc, KeyDesc, PlatformDesc, SceneDescriptor};
pub use error::{Result, SceneError};
pub use meshes::MeshSet;
