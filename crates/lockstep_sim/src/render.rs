//! Render submission contract
//!
//! Once per frame the simulation hands the renderer every visible
//! (mesh, world matrix) pair, ordered by entity id for determinism. The
//! renderer issues draw calls; nothing flows back.

use lockstep_ecs::MeshHandle;
use lockstep_math::Mat4;

/// Consumer of per-frame draw submissions
pub trait Renderer {
    /// Submit one mesh instance at a world transform
    fn submit(&mut self, mesh: MeshHandle, world: Mat4);
}
