//! # lockstep_math - Math primitives for the Lockstep simulation core
//!
//! Small, self-contained vector/matrix types sized to what the simulation
//! actually needs: 3-component vectors, column-major 4x4 matrices, and a
//! `Transform` whose world matrix is recomputed eagerly on every mutation.

pub mod matrix;
pub mod transform;
pub mod vector;

pub use matrix::Mat4;
pub use transform::Transform;
pub use vector::{Vec3, Vec4};
