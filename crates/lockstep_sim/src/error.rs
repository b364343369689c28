//! Error types for the simulation loop

use lockstep_physics::PhysicsError;
use lockstep_scene::SceneError;
use thiserror::Error;

/// Fatal simulation faults. Per-frame inconsistencies (a player briefly
/// missing its body) are recovered locally and never surface here.
#[derive(Debug, Error)]
pub enum SimError {
    /// The simulation was constructed with an empty scene list
    #[error("no scenes configured")]
    NoScenes,

    /// Scene configuration or build failure
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Physics resource failure outside a scene build
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
