use crate::{
    data_structures::{Vertex, texture::Texture, voxel::CubeVertex},
    pipelines::{SharedLayouts, mk_render_pipeline},
};

pub fn mk_voxbox_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    layouts: &SharedLayouts,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Voxbox Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.placement, &layouts.sun],
        push_constant_ranges: &[],
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Voxbox Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("voxbox_shader.wgsl").into()),
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
        wgpu::PrimitiveTopology::TriangleList,
        Some(wgpu::Face::Back),
        &[CubeVertex::desc()],
        shader,
    )
}
