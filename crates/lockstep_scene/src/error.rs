//! Error types for scene building

use lockstep_physics::PhysicsError;
use thiserror::Error;

/// Scene configuration and build errors. All of these are fatal: the
/// simulation loop must not start against a partially-built scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The same key/door id appears more than once
    #[error("duplicate object id in scene configuration: {0:?}")]
    DuplicateObjectId(String),

    /// Physics body creation failed
    #[error("physics error during scene build: {0}")]
    Physics(#[from] PhysicsError),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
