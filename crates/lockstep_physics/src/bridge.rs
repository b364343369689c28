//! Entity-to-body bridge
//!
//! Velocity commands flow in through here; positions flow back out into the
//! transform table. Body lifetime is tied to entity lifetime: detaching an
//! entity removes its engine-side body in the same operation.

use crate::engine::{BodyHandle, PhysicsEngine};
use crate::error::{PhysicsError, Result};
use lockstep_ecs::{ComponentTable, Entity};
use lockstep_math::{Transform, Vec3};
use std::collections::HashMap;

/// Maps entities to physics-engine body handles
#[derive(Debug, Default)]
pub struct PhysicsBridge {
    bodies: HashMap<Entity, BodyHandle>,
}

impl PhysicsBridge {
    /// Create an empty bridge
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an entity to a body handle
    pub fn attach(&mut self, entity: Entity, handle: BodyHandle) {
        self.bodies.insert(entity, handle);
    }

    /// The body handle bound to an entity
    pub fn handle(&self, entity: Entity) -> Option<BodyHandle> {
        self.bodies.get(&entity).copied()
    }

    /// Whether an entity has a body
    pub fn is_bound(&self, entity: Entity) -> bool {
        self.bodies.contains_key(&entity)
    }

    /// Entities with bodies
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.bodies.keys().copied()
    }

    /// Number of bound entities
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no entity is bound
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Unbind an entity and remove its body from the engine. Returns false
    /// when the entity had no body.
    pub fn detach(&mut self, entity: Entity, engine: &mut dyn PhysicsEngine) -> bool {
        match self.bodies.remove(&entity) {
            Some(handle) => {
                engine.remove_body(handle);
                true
            }
            None => false,
        }
    }

    /// Remove every body from the engine and clear the map (scene teardown)
    pub fn detach_all(&mut self, engine: &mut dyn PhysicsEngine) {
        for (_, handle) in self.bodies.drain() {
            engine.remove_body(handle);
        }
    }

    /// Push a velocity command for an entity's body
    pub fn set_velocity(
        &self,
        engine: &mut dyn PhysicsEngine,
        entity: Entity,
        velocity: Vec3,
    ) -> Result<()> {
        let handle = self
            .handle(entity)
            .ok_or(PhysicsError::EntityNotBound(entity))?;
        engine.set_linear_velocity(handle, velocity)
    }

    /// Read the linear velocity of an entity's body
    pub fn velocity(&self, engine: &dyn PhysicsEngine, entity: Entity) -> Result<Vec3> {
        let handle = self
            .handle(entity)
            .ok_or(PhysicsError::EntityNotBound(entity))?;
        engine.linear_velocity(handle)
    }

    /// Read the position of an entity's body
    pub fn position(&self, engine: &dyn PhysicsEngine, entity: Entity) -> Result<Vec3> {
        let handle = self
            .handle(entity)
            .ok_or(PhysicsError::EntityNotBound(entity))?;
        engine.position(handle)
    }

    /// Overwrite every bound entity's transform position from the engine's
    /// reported position. Rotation and scale are untouched; the cached
    /// matrix is recomputed by the transform mutator.
    pub fn sync_transforms(
        &self,
        engine: &dyn PhysicsEngine,
        transforms: &mut ComponentTable<Transform>,
    ) {
        for (&entity, &handle) in &self.bodies {
            let position = match engine.position(handle) {
                Ok(p) => p,
                Err(err) => {
                    log::warn!("transform sync skipped for {entity}: {err}");
                    continue;
                }
            };
            if let Some(transform) = transforms.get_mut(entity) {
                transform.set_position(position);
            }
        }
    }
}
