//! Mesh handles stamped onto built entities
//!
//! Mesh/color resources are owned by the asset layer; the builder only
//! borrows opaque handles and assigns them to renderables.

use lockstep_ecs::MeshHandle;

/// The fixed set of mesh handles a scene build needs
#[derive(Debug, Clone, Copy)]
pub struct MeshSet {
    /// Player body
    pub player: MeshHandle,
    /// Floor slab
    pub floor: MeshHandle,
    /// Platform box
    pub platform: MeshHandle,
    /// Collectible
    pub collectible: MeshHandle,
    /// Win marker
    pub win: MeshHandle,
    /// Key
    pub key: MeshHandle,
    /// Door slab
    pub door: MeshHandle,
}

impl MeshSet {
    /// Sequentially numbered handles, useful for tests and simple asset
    /// layers that register meshes in a fixed order
    pub fn sequential() -> Self {
        Self {
            player: MeshHandle(0),
            floor: MeshHandle(1),
            platform: MeshHandle(2),
            collectible: MeshHandle(3),
            win: MeshHandle(4),
            key: MeshHandle(5),
            door: MeshHandle(6),
        }
    }
}
