//! The water surface renderable.
//!
//! A water body is authored as a flat boundary polygon (2D points on the
//! water plane). It is fan-triangulated at construction and positioned by a
//! world-space translation; at most one water body exists per scene.

use cgmath::{Vector2, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::Vertex;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaterVertex {
    // x/z on the water plane; y comes from the uniform
    pub position: [f32; 2],
}

impl Vertex for WaterVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<WaterVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct WaterUniform {
    // world position in xyz, w unused
    position: [f32; 4],
}

pub struct WaterRender {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group: wgpu::BindGroup,
    #[allow(unused)]
    uniform_buffer: wgpu::Buffer,
}

impl WaterRender {
    /// Build a water surface from its boundary polygon. Callers guarantee at
    /// least 3 points; the parser discards smaller boundaries.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        boundary: &[Vector2<f32>],
        position: Vector3<f32>,
    ) -> Self {
        let vertices = boundary
            .iter()
            .map(|p| WaterVertex {
                position: [p.x, p.y],
            })
            .collect::<Vec<_>>();

        // Fan triangulation around the first boundary vertex.
        let mut indices = Vec::with_capacity((boundary.len() - 2) * 3);
        for i in 1..boundary.len() as u32 - 1 {
            indices.extend_from_slice(&[0, i, i + 1]);
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = WaterUniform {
            position: [position.x, position.y, position.z, 0.0],
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("water_bind_group"),
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            bind_group,
            uniform_buffer,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
