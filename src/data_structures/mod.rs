//! Engine data structures: transforms, voxel instances, and renderable objects.
//!
//! - `transform` holds position/rotation composition for the scene hierarchy
//! - `voxel` holds packed voxel instance data and the instanced voxel renderer
//! - `voxbox` is a procedurally sized, colored box renderable
//! - `water` is a fan-triangulated water surface renderable
//! - `rope` is a line-strip rope renderable
//! - `texture` contains GPU texture wrappers (depth, shadow map, palette)

pub mod rope;
pub mod texture;
pub mod transform;
pub mod voxbox;
pub mod voxel;
pub mod water;

/// Anything with a vertex buffer layout the pipelines can bind.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}
