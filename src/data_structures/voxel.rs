//! Instanced voxel rendering data: packed per-voxel attributes and the
//! shared unit cube mesh.
//!
//! Every voxel model is drawn as one instanced call: a single 24-vertex /
//! 12-triangle unit cube, plus one instance-rate buffer holding a packed
//! [`VoxelInstance`] per voxel. The placement of the whole model (local and
//! world position/rotation, uniform scale) travels in a
//! [`PlacementUniform`]; composition happens in the vertex shader so the CPU
//! never rebuilds matrices per frame.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::data_structures::{Vertex, transform::Transform};

/// One packed per-voxel attribute record: three quantized position bytes and
/// a palette index. Consumed as a single `Uint8x4` instance attribute.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelInstance {
    pub position: [u8; 3],
    pub palette: u8,
}

impl Vertex for VoxelInstance {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VoxelInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                // xyz = relative position, w = palette index
                format: wgpu::VertexFormat::Uint8x4,
            }],
        }
    }
}

/// A vertex of the shared cube mesh: corner position (0 or 1 per axis) and
/// outward face normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for CubeVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

const fn v(position: [f32; 3], normal: [f32; 3]) -> CubeVertex {
    CubeVertex { position, normal }
}

//   6--------7
//  /|       /|
// 2--------3 |
// | |      | |
// | 4------|-5
// |/       |/
// 0--------1
pub const CUBE_VERTICES: [CubeVertex; 24] = [
    v([0.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    v([1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    v([0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
    v([1.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
    v([0.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
    v([0.0, 0.0, 1.0], [0.0, -1.0, 0.0]),
    v([1.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
    v([1.0, 0.0, 1.0], [0.0, -1.0, 0.0]),
    v([0.0, 0.0, 0.0], [-1.0, 0.0, 0.0]),
    v([0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]),
    v([0.0, 0.0, 1.0], [-1.0, 0.0, 0.0]),
    v([0.0, 1.0, 1.0], [-1.0, 0.0, 0.0]),
    v([1.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
    v([1.0, 0.0, 1.0], [0.0, 0.0, 1.0]),
    v([0.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
    v([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]),
    v([1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
    v([0.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
    v([1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
    v([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
    v([1.0, 1.0, 1.0], [1.0, 0.0, 0.0]),
    v([1.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    v([1.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    v([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,
     2,  1,  3,
     4,  5,  6,
     6,  5,  7,
     8,  9, 10,
    10,  9, 11,
    12, 13, 14,
    14, 13, 15,
    16, 17, 18,
    18, 17, 19,
    20, 21, 22,
    22, 21, 23,
];

/// The 4-matrix placement hierarchy plus uniform scale, as the voxel shaders
/// consume it.
///
/// `position`/`rotation` hold the placement authored in the scene document;
/// `world_position`/`world_rotation` hold a runtime-driven placement (e.g. a
/// platform the model rides on) and default to identity. Keeping the pair
/// separate lets the shader compose them without any per-frame CPU matrix
/// work.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlacementUniform {
    position: [[f32; 4]; 4],
    rotation: [[f32; 4]; 4],
    world_position: [[f32; 4]; 4],
    world_rotation: [[f32; 4]; 4],
    // scale in x, rest is uniform padding
    scale: [f32; 4],
}

impl PlacementUniform {
    pub fn new(local: &Transform, world: &Transform, scale: f32) -> Self {
        Self {
            position: Matrix4::from_translation(local.position).into(),
            rotation: Matrix4::from(local.rotation).into(),
            world_position: Matrix4::from_translation(world.position).into(),
            world_rotation: Matrix4::from(world.rotation).into(),
            scale: [scale, 0.0, 0.0, 0.0],
        }
    }
}

/// One instanced draw per voxel model: the shared cube mesh plus a
/// per-instance attribute buffer.
///
/// Bind groups (camera, placement, palette, sun) are supplied by the caller;
/// `draw` itself holds no placement state.
pub struct VoxelRender {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

impl VoxelRender {
    pub fn new(device: &wgpu::Device, voxels: &[VoxelInstance]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Voxel Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Voxel Cube Index Buffer"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Voxel Instance Buffer"),
            contents: bytemuck::cast_slice(voxels),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_count: voxels.len() as u32,
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Issue the single instanced draw covering 36 indices x instance count.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            log::warn!("you attempted to render a voxel model with zero voxels");
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..CUBE_INDICES.len() as u32, 0, 0..self.instance_count);
    }
}
