//! The external physics engine contract

use crate::error::Result;
use lockstep_math::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle to a rigid body inside a physics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

/// Description of a rigid body. Shapes are limited to axis-aligned boxes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Half extents of the box shape
    pub half_extents: Vec3,
    /// Initial position of the box center
    pub position: Vec3,
    /// Dynamic (simulated) or static (immovable)
    pub dynamic: bool,
    /// Mass density; 0 defers to the engine default
    pub density: f32,
}

impl BodyDesc {
    /// A static box with full extents `size`
    pub fn fixed(position: Vec3, size: Vec3) -> Self {
        Self {
            half_extents: size * 0.5,
            position,
            dynamic: false,
            density: 0.0,
        }
    }

    /// A dynamic box with full extents `size`
    pub fn dynamic(position: Vec3, size: Vec3) -> Self {
        Self {
            half_extents: size * 0.5,
            position,
            dynamic: true,
            density: 0.0,
        }
    }

    /// Set the density
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }
}

/// Black-box rigid-body simulator. The simulation core drives it and reads
/// results back; collision resolution and dynamics live entirely behind
/// this trait.
pub trait PhysicsEngine {
    /// Create a body. Failure is an unrecoverable environment fault, never
    /// retried.
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle>;

    /// Remove a body. Removing an unknown handle is a no-op.
    fn remove_body(&mut self, handle: BodyHandle);

    /// Advance the simulation by exactly one fixed timestep. Fixed-step
    /// accumulation happens in the caller.
    fn step(&mut self);

    /// Current position of a body
    fn position(&self, handle: BodyHandle) -> Result<Vec3>;

    /// Current linear velocity of a body
    fn linear_velocity(&self, handle: BodyHandle) -> Result<Vec3>;

    /// Overwrite the linear velocity of a body
    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> Result<()>;
}
