//! # lockstep_physics - Rigid-body plumbing for the Lockstep simulation core
//!
//! The simulation treats the physics engine as a black box behind the
//! [`PhysicsEngine`] trait: create/remove axis-aligned box bodies, advance
//! one fixed timestep, read positions and velocities back. [`RapierEngine`]
//! is the production implementation over Rapier 3D.
//!
//! [`PhysicsBridge`] ties entities to engine-side body handles. Creation and
//! removal are paired: detaching an entity removes its body in the same
//! operation, so no dangling handle can survive a door opening or a scene
//! teardown.

pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod rapier;

pub use bridge::PhysicsBridge;
pub use config::PhysicsConfig;
pub use engine::{BodyDesc, BodyHandle, PhysicsEngine};
pub use error::{PhysicsError, Result};
pub use rapier::RapierEngine;
