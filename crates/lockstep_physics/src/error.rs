//! Error types for the physics layer

use crate::engine::BodyHandle;
use lockstep_ecs::Entity;
use thiserror::Error;

/// Physics layer errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Body handle does not refer to a live body
    #[error("rigid body not found: {0:?}")]
    BodyNotFound(BodyHandle),

    /// Entity has no body bound in the bridge
    #[error("entity {0} has no physics body")]
    EntityNotBound(Entity),

    /// Body description was rejected by the engine
    #[error("invalid body description: {0}")]
    InvalidBody(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
