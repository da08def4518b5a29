use crate::{
    data_structures::{Vertex, rope::RopeVertex, texture::Texture},
    pipelines::{SharedLayouts, mk_render_pipeline},
};

pub fn mk_rope_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    layouts: &SharedLayouts,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Rope Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.placement],
        push_constant_ranges: &[],
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Rope Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("rope_shader.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(Texture::DEPTH_FORMAT),
        wgpu::PrimitiveTopology::LineStrip,
        None,
        &[RopeVertex::desc()],
        shader,
    )
}
