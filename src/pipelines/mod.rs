//! Render pipelines and the bind group layouts they share.
//!
//! Group assignments are fixed across all pipelines so render passes can
//! bind once and draw many: group 0 camera, group 1 per-placement uniform,
//! group 2 per-model-object data (voxel pipelines only), group 3 sun and
//! shadow map.

pub mod rope;
pub mod shadow;
pub mod voxbox;
pub mod voxel;
pub mod water;

/// Bind group layouts created once and shared by every pipeline and
/// renderable. Layout handles are reference counted, cloning is cheap.
#[derive(Clone)]
pub struct SharedLayouts {
    /// Group 0: one uniform buffer (camera, or the sun's view-projection
    /// during the shadow pass).
    pub camera: wgpu::BindGroupLayout,
    /// Group 1: one uniform buffer per placed renderable.
    pub placement: wgpu::BindGroupLayout,
    /// Group 2: per-object offset uniform plus the model's palette texture.
    pub object: wgpu::BindGroupLayout,
    /// Group 3: sun uniform, shadow map, comparison sampler.
    pub sun: wgpu::BindGroupLayout,
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl SharedLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let camera = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0)],
            label: Some("camera_bind_group_layout"),
        });
        let placement = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0)],
            label: Some("placement_bind_group_layout"),
        });
        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                uniform_entry(0),
                // palette, read with textureLoad so no sampler needed
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
            label: Some("object_bind_group_layout"),
        });
        let sun = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                uniform_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
            label: Some("sun_bind_group_layout"),
        });

        Self {
            camera,
            placement,
            object,
            sun,
        }
    }
}

/// All pipelines, created up front; nothing is compiled mid-frame.
pub struct Pipelines {
    pub voxel: wgpu::RenderPipeline,
    pub voxbox: wgpu::RenderPipeline,
    pub water: wgpu::RenderPipeline,
    pub rope: wgpu::RenderPipeline,
    pub shadow: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        layouts: &SharedLayouts,
    ) -> Self {
        Self {
            voxel: voxel::mk_voxel_pipeline(device, config, layouts),
            voxbox: voxbox::mk_voxbox_pipeline(device, config, layouts),
            water: water::mk_water_pipeline(device, config, layouts),
            rope: rope::mk_rope_pipeline(device, config, layouts),
            shadow: shadow::mk_shadow_pipeline(device, layouts),
        }
    }
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_format: Option<wgpu::TextureFormat>,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
