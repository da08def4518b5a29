//! The rope renderable: a colored line strip through control points.

use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::{Vertex, transform::Transform};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RopeVertex {
    pub position: [f32; 3],
}

impl Vertex for RopeVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RopeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct RopeUniform {
    position: [[f32; 4]; 4],
    rotation: [[f32; 4]; 4],
    color: [f32; 4],
}

pub struct RopeRender {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
    #[allow(unused)]
    uniform_buffer: wgpu::Buffer,
}

impl RopeRender {
    /// Build a rope from its control points. Callers guarantee at least 2
    /// points; the parser discards shorter point lists.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        points: &[Vector3<f32>],
        color: Vector3<f32>,
        transform: &Transform,
    ) -> Self {
        let vertices = points
            .iter()
            .map(|p| RopeVertex {
                position: [p.x, p.y, p.z],
            })
            .collect::<Vec<_>>();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rope Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform = RopeUniform {
            position: Matrix4::from_translation(transform.position).into(),
            rotation: Matrix4::from(transform.rotation).into(),
            color: [color.x, color.y, color.z, 1.0],
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rope Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("rope_bind_group"),
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            bind_group,
            uniform_buffer,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}
