//! Procedural bounding boxes ("voxboxes").
//!
//! A voxbox generates its own cube mesh at construction time, sized by the
//! half extent from the scene document. There is deliberately no mesh
//! deduplication here; voxboxes are rare, per-instance geometry.

use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::{
    transform::Transform,
    voxel::{CUBE_INDICES, CUBE_VERTICES, CubeVertex},
};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct VoxboxUniform {
    position: [[f32; 4]; 4],
    rotation: [[f32; 4]; 4],
    // rgb in xyz, w unused
    color: [f32; 4],
}

/// A colored box renderable with its world transform baked into a uniform at
/// construction.
pub struct VoxboxRender {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    #[allow(unused)]
    uniform_buffer: wgpu::Buffer,
}

impl VoxboxRender {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        size: Vector3<f32>,
        color: Vector3<f32>,
        transform: &Transform,
    ) -> Self {
        // Reuse the unit cube table, stretched from the center by the half
        // extent: corners land at -size..+size.
        let vertices = CUBE_VERTICES
            .iter()
            .map(|v| CubeVertex {
                position: [
                    (v.position[0] * 2.0 - 1.0) * size.x,
                    (v.position[1] * 2.0 - 1.0) * size.y,
                    (v.position[2] * 2.0 - 1.0) * size.z,
                ],
                normal: v.normal,
            })
            .collect::<Vec<_>>();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Voxbox Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Voxbox Index Buffer"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = VoxboxUniform {
            position: Matrix4::from_translation(transform.position).into(),
            rotation: Matrix4::from(transform.rotation).into(),
            color: [color.x, color.y, color.z, 1.0],
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Voxbox Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("voxbox_bind_group"),
        });

        Self {
            vertex_buffer,
            index_buffer,
            bind_group,
            uniform_buffer,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..CUBE_INDICES.len() as u32, 0, 0..1);
    }
}
