//! Transform component with an eagerly cached world matrix
//!
//! The cached matrix always equals
//! `translate(position) * rot_x * rot_y * rot_z * scale(scale)`.
//! Every mutator recomputes it before returning, so readers (render
//! submission, trigger evaluation) never see a stale matrix.

use crate::matrix::Mat4;
use crate::vector::Vec3;

/// Position, Euler rotation (radians), scale, and the derived world matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    matrix: Mat4,
}

impl Transform {
    /// Create a transform; the matrix is computed up front
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            matrix: compose(position, rotation, scale),
        }
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::ONE)
    }

    /// Create from position and scale
    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, scale)
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// The cached world matrix
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Overwrite the position, recomputing the matrix
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recompute();
    }

    /// Overwrite the Euler rotation, recomputing the matrix
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.recompute();
    }

    /// Overwrite the scale, recomputing the matrix
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recompute();
    }

    /// Add an Euler rotation delta, recomputing the matrix
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.matrix = compose(self.position, self.rotation, self.scale);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE)
    }
}

fn compose(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_z(rotation.z)
        * Mat4::from_scale(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_cached_on_construction() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.matrix().translation(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_matrix_recomputed_on_mutation() {
        let mut t = Transform::default();
        t.set_position(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(t.matrix().translation(), Vec3::new(5.0, 0.0, 0.0));

        t.set_scale(Vec3::splat(2.0));
        let p = t.matrix().transform_point(Vec3::ONE);
        assert_eq!(p, Vec3::new(7.0, 2.0, 2.0));
    }

    #[test]
    fn test_compose_order() {
        // Scale applies before rotation before translation
        let mut t = Transform::default();
        t.set_rotation(Vec3::new(0.0, core::f32::consts::FRAC_PI_2, 0.0));
        t.set_position(Vec3::new(10.0, 0.0, 0.0));
        let p = t.matrix().transform_point(Vec3::X);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut t = Transform::default();
        t.rotate(Vec3::new(0.0, 0.1, 0.0));
        t.rotate(Vec3::new(0.0, 0.2, 0.0));
        assert_relative_eq!(t.rotation().y, 0.3, epsilon = 1e-6);
    }
}
