//! Sun light and its shadow pass.
//!
//! The sun is directional: one orthographic depth pass over the scene, then
//! the main pass compares against the resulting shadow map. Two bind groups
//! hang off [`SunResources`]: one feeding the depth pass (sun view-projection
//! in the camera slot) and one feeding the shading passes (sun uniform plus
//! shadow map).

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    camera::OPENGL_TO_WGPU_MATRIX,
    data_structures::{
        Vertex,
        texture::Texture,
        voxel::{CubeVertex, VoxelInstance},
    },
    pipelines::SharedLayouts,
};

const SHADOW_MAP_SIZE: u32 = 2048;
// half-extent of the orthographic volume the sun covers
const SHADOW_EXTENT: f32 = 150.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SunUniform {
    view_proj: [[f32; 4]; 4],
    direction: [f32; 4],
    color: [f32; 4],
}

pub struct SunResources {
    pub uniform: SunUniform,
    pub buffer: wgpu::Buffer,
    pub pass_buffer: wgpu::Buffer,
    /// Bound at group 0 during the shadow pass, in place of the camera.
    pub pass_bind_group: wgpu::BindGroup,
    /// Bound at the sun slot of the shading pipelines.
    pub shade_bind_group: wgpu::BindGroup,
    pub shadow_map: Texture,
}

impl SunResources {
    pub fn new(device: &wgpu::Device, layouts: &SharedLayouts) -> Self {
        let direction = Vector3::new(-0.6, -1.0, -0.35).normalize();
        let view_proj = sun_view_proj(direction);
        let uniform = SunUniform {
            view_proj: view_proj.into(),
            direction: [direction.x, direction.y, direction.z, 0.0],
            color: [1.0, 0.97, 0.9, 1.0],
        };

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sun Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let view_proj_raw: [[f32; 4]; 4] = view_proj.into();
        let pass_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sun Pass Buffer"),
            contents: bytemuck::cast_slice(&[view_proj_raw]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shadow_map = Texture::create_shadow_map(device, SHADOW_MAP_SIZE);
        let shadow_sampler = shadow_map
            .sampler
            .as_ref()
            .unwrap_or_else(|| unreachable!("shadow maps always carry a sampler"));

        let pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layouts.camera,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: pass_buffer.as_entire_binding(),
            }],
            label: Some("sun_pass_bind_group"),
        });
        let shade_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layouts.sun,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(shadow_sampler),
                },
            ],
            label: Some("sun_shade_bind_group"),
        });

        Self {
            uniform,
            buffer,
            pass_buffer,
            pass_bind_group,
            shade_bind_group,
            shadow_map,
        }
    }
}

fn sun_view_proj(direction: Vector3<f32>) -> Matrix4<f32> {
    let center = Point3::new(0.0, 0.0, 0.0);
    let eye = center - direction * SHADOW_EXTENT;
    let view = Matrix4::look_at_rh(eye, center, Vector3::unit_y());
    let proj = cgmath::ortho(
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        0.1,
        2.0 * SHADOW_EXTENT,
    );
    OPENGL_TO_WGPU_MATRIX * proj * view
}

/// Depth-only pipeline rendering voxel shapes from the sun's point of view.
pub fn mk_shadow_pipeline(device: &wgpu::Device, layouts: &SharedLayouts) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.placement, &layouts.object],
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shadow_shader.wgsl").into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Shadow Pipeline"),
        layout: Some(&render_pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[CubeVertex::desc(), VoxelInstance::desc()],
            compilation_options: Default::default(),
        },
        // depth only
        fragment: None,
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
