//! Rapier 3D implementation of the engine contract

use crate::config::PhysicsConfig;
use crate::engine::{BodyDesc, BodyHandle, PhysicsEngine};
use crate::error::{PhysicsError, Result};
use lockstep_math::Vec3;
use rapier3d::prelude as rapier;
use std::collections::HashMap;

/// Production physics engine backed by Rapier 3D
pub struct RapierEngine {
    /// Configuration
    config: PhysicsConfig,
    /// Rapier physics pipeline
    pipeline: rapier::PhysicsPipeline,
    /// Gravity
    gravity: rapier::Vector<f32>,
    /// Integration parameters (dt = configured fixed timestep)
    integration_params: rapier::IntegrationParameters,
    /// Island manager
    islands: rapier::IslandManager,
    /// Broad phase
    broad_phase: rapier::DefaultBroadPhase,
    /// Narrow phase
    narrow_phase: rapier::NarrowPhase,
    /// Impulse joint set (unused by the core, required by the pipeline)
    impulse_joints: rapier::ImpulseJointSet,
    /// Multibody joint set
    multibody_joints: rapier::MultibodyJointSet,
    /// CCD solver
    ccd_solver: rapier::CCDSolver,
    /// Rigid body set
    bodies: rapier::RigidBodySet,
    /// Collider set
    colliders: rapier::ColliderSet,
    /// Our opaque handles to Rapier's
    handles: HashMap<u64, rapier::RigidBodyHandle>,
    /// Next opaque handle id
    next_handle: u64,
}

impl RapierEngine {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Self {
        let gravity = rapier::Vector::new(config.gravity.x, config.gravity.y, config.gravity.z);

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;

        Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            handles: HashMap::new(),
            next_handle: 0,
        }
    }

    /// The configuration this world was built with
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn body(&self, handle: BodyHandle) -> Result<&rapier::RigidBody> {
        self.handles
            .get(&handle.0)
            .and_then(|h| self.bodies.get(*h))
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut rapier::RigidBody> {
        let raw = *self
            .handles
            .get(&handle.0)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        self.bodies
            .get_mut(raw)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }
}

impl Default for RapierEngine {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsEngine for RapierEngine {
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle> {
        if desc.half_extents.x <= 0.0 || desc.half_extents.y <= 0.0 || desc.half_extents.z <= 0.0 {
            return Err(PhysicsError::InvalidBody(format!(
                "non-positive box half extents {:?}",
                desc.half_extents.to_array()
            )));
        }

        let builder = if desc.dynamic {
            rapier::RigidBodyBuilder::dynamic()
        } else {
            rapier::RigidBodyBuilder::fixed()
        }
        .translation(rapier::Vector::new(
            desc.position.x,
            desc.position.y,
            desc.position.z,
        ));

        let body = self.bodies.insert(builder);

        let density = if desc.density > 0.0 {
            desc.density
        } else {
            self.config.default_density
        };
        let collider = rapier::ColliderBuilder::cuboid(
            desc.half_extents.x,
            desc.half_extents.y,
            desc.half_extents.z,
        )
        .density(density);
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(handle.0, body);
        Ok(handle)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        let Some(raw) = self.handles.remove(&handle.0) else {
            log::warn!("remove_body called with unknown handle {handle:?}");
            return;
        };
        self.bodies.remove(
            raw,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true, // Remove attached colliders
        );
    }

    fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn position(&self, handle: BodyHandle) -> Result<Vec3> {
        let pos = self.body(handle)?.translation();
        Ok(Vec3::new(pos.x, pos.y, pos.z))
    }

    fn linear_velocity(&self, handle: BodyHandle) -> Result<Vec3> {
        let vel = self.body(handle)?.linvel();
        Ok(Vec3::new(vel.x, vel.y, vel.z))
    }

    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> Result<()> {
        self.body_mut(handle)?.set_linvel(
            rapier::Vector::new(velocity.x, velocity.y, velocity.z),
            true,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_remove() {
        let mut engine = RapierEngine::default();
        let handle = engine
            .create_body(&BodyDesc::dynamic(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE))
            .unwrap();
        assert_eq!(engine.body_count(), 1);

        engine.remove_body(handle);
        assert_eq!(engine.body_count(), 0);
        assert!(engine.position(handle).is_err());
    }

    #[test]
    fn test_invalid_shape_rejected() {
        let mut engine = RapierEngine::default();
        let err = engine
            .create_body(&BodyDesc::dynamic(Vec3::ZERO, Vec3::ZERO))
            .unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidBody(_)));
    }

    #[test]
    fn test_gravity_fall() {
        let mut engine = RapierEngine::default();
        let body = engine
            .create_body(&BodyDesc::dynamic(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE))
            .unwrap();

        let initial_y = engine.position(body).unwrap().y;
        for _ in 0..60 {
            engine.step();
        }
        let final_y = engine.position(body).unwrap().y;
        assert!(final_y < initial_y, "body should fall due to gravity");
    }

    #[test]
    fn test_static_body_stays_put() {
        let mut engine = RapierEngine::default();
        let body = engine
            .create_body(&BodyDesc::fixed(
                Vec3::new(1.0, 2.0, 3.0),
                Vec3::new(10.0, 1.0, 10.0),
            ))
            .unwrap();

        for _ in 0..30 {
            engine.step();
        }
        assert_eq!(engine.position(body).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_set_linear_velocity() {
        let mut engine = RapierEngine::new(PhysicsConfig::default().with_gravity(Vec3::ZERO));
        let body = engine
            .create_body(&BodyDesc::dynamic(Vec3::ZERO, Vec3::ONE))
            .unwrap();

        engine
            .set_linear_velocity(body, Vec3::new(6.0, 0.0, 0.0))
            .unwrap();
        for _ in 0..60 {
            engine.step();
        }

        let pos = engine.position(body).unwrap();
        assert!(pos.x > 5.0, "body should have drifted along +X, got {pos:?}");
    }
}
