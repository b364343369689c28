//! Scene builder
//!
//! Turns a descriptor plus persistent state into a populated registry and
//! physics world. Keys already collected and doors already opened get no
//! entity, no renderable, and no physics body - on every rebuild, forever.

use crate::descriptor::SceneDescriptor;
use crate::error::Result;
use crate::meshes::MeshSet;
use lockstep_ecs::{
    Collectible, Entity, Interactable, Platform, Player, Registry, Renderable, WinCondition,
};
use lockstep_math::{Transform, Vec3};
use lockstep_physics::{BodyDesc, PhysicsBridge, PhysicsEngine};
use lockstep_state::PersistentState;

/// Build-time constants that are not part of the descriptor
#[derive(Debug, Clone, Copy)]
pub struct BuildSettings {
    /// Full extents of the player's box body
    pub player_size: Vec3,
    /// Player body density
    pub player_density: f32,
    /// Full extents of the static floor
    pub floor_size: Vec3,
    /// Center of the static floor
    pub floor_center: Vec3,
    /// Pickup distance for collectibles
    pub collectible_radius: f32,
    /// Interaction distance for keys and doors
    pub interact_radius: f32,
    /// Trigger distance for the win condition
    pub win_radius: f32,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            player_size: Vec3::ONE,
            player_density: 1.0,
            floor_size: Vec3::new(50.0, 1.0, 50.0),
            floor_center: Vec3::new(0.0, -0.5, 0.0),
            collectible_radius: 1.0,
            interact_radius: 2.0,
            win_radius: 1.0,
        }
    }
}

/// Handles to the entities a frame needs direct access to
#[derive(Debug, Clone, Copy)]
pub struct BuiltScene {
    /// The controlled entity
    pub player: Entity,
}

/// Populate `registry` and the physics world from a descriptor.
///
/// The registry and bridge are expected to be empty (the caller clears them
/// on scene transition); persistent state is read to skip consumed objects
/// and updated with any ids seen for the first time.
pub fn build(
    descriptor: &SceneDescriptor,
    settings: &BuildSettings,
    meshes: &MeshSet,
    state: &mut PersistentState,
    engine: &mut dyn PhysicsEngine,
    bridge: &mut PhysicsBridge,
    registry: &mut Registry,
) -> Result<BuiltScene> {
    // Fail fast before any entity or body exists
    descriptor.validate()?;

    // Player
    let player = registry.spawn();
    registry
        .transforms
        .insert(player, Transform::from_position(descriptor.player_start));
    registry.renderables.insert(player, Renderable::new(meshes.player));
    registry.players.insert(player, Player);
    let body = engine.create_body(
        &BodyDesc::dynamic(descriptor.player_start, settings.player_size)
            .with_density(settings.player_density),
    )?;
    bridge.attach(player, body);

    // Floor
    let floor = registry.spawn();
    registry.transforms.insert(
        floor,
        Transform::from_position_scale(settings.floor_center, settings.floor_size),
    );
    registry.renderables.insert(floor, Renderable::new(meshes.floor));
    registry.platforms.insert(
        floor,
        Platform {
            top_surface_y: settings.floor_center.y + settings.floor_size.y / 2.0,
        },
    );
    let body = engine.create_body(&BodyDesc::fixed(settings.floor_center, settings.floor_size))?;
    bridge.attach(floor, body);

    // Win condition - never skipped, always fresh for this visit
    let win = registry.spawn();
    registry
        .transforms
        .insert(win, Transform::from_position(descriptor.win_position));
    registry.renderables.insert(win, Renderable::new(meshes.win));
    registry
        .win_conditions
        .insert(win, WinCondition::new(settings.win_radius));

    // Collectibles - scene-local, always all present on a (re)build
    for &position in &descriptor.collectibles {
        let entity = registry.spawn();
        registry
            .transforms
            .insert(entity, Transform::from_position(position));
        registry
            .renderables
            .insert(entity, Renderable::new(meshes.collectible));
        registry
            .collectibles
            .insert(entity, Collectible::new(settings.collectible_radius));
    }

    // Keys - projected from persistent state
    let mut skipped_keys = 0usize;
    for key in &descriptor.keys {
        state.register_key(&key.id, key.color);
        if state.key_collected(&key.id) {
            skipped_keys += 1;
            continue;
        }
        let entity = registry.spawn();
        registry
            .transforms
            .insert(entity, Transform::from_position(key.position));
        registry.renderables.insert(entity, Renderable::new(meshes.key));
        registry.interactables.insert(
            entity,
            Interactable::Key {
                id: key.id.clone(),
                color: key.color,
                trigger_radius: settings.interact_radius,
            },
        );
    }

    // Doors - projected from persistent state; open doors leave no geometry
    // and no body behind
    let mut skipped_doors = 0usize;
    for door in &descriptor.doors {
        state.register_door(&door.id, door.color);
        if state.door_open(&door.id) {
            skipped_doors += 1;
            continue;
        }
        let entity = registry.spawn();
        registry
            .transforms
            .insert(entity, Transform::from_position_scale(door.position, door.size));
        registry.renderables.insert(entity, Renderable::new(meshes.door));
        registry.interactables.insert(
            entity,
            Interactable::Door {
                id: door.id.clone(),
                color: door.color,
                trigger_radius: settings.interact_radius,
            },
        );
        let body = engine.create_body(&BodyDesc::fixed(door.position, door.size))?;
        bridge.attach(entity, body);
    }

    // Platforms
    for platform in &descriptor.platforms {
        let entity = registry.spawn();
        registry.transforms.insert(
            entity,
            Transform::from_position_scale(platform.position, platform.size),
        );
        registry
            .renderables
            .insert(entity, Renderable::new(meshes.platform));
        registry.platforms.insert(
            entity,
            Platform {
                top_surface_y: platform.position.y + platform.size.y / 2.0,
            },
        );
        let body = engine.create_body(&BodyDesc::fixed(platform.position, platform.size))?;
        bridge.attach(entity, body);
    }

    log::info!(
        "scene built: {} collectibles, {} platforms, {} keys ({skipped_keys} skipped), {} doors ({skipped_doors} skipped)",
        descriptor.collectibles.len(),
        descriptor.platforms.len(),
        descriptor.keys.len() - skipped_keys,
        descriptor.doors.len() - skipped_doors,
    );

    Ok(BuiltScene { player })
}
