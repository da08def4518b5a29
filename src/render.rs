//! Frame composition.
//!
//! Two passes per frame: a depth-only shadow pass from the sun, then the
//! main pass over the surface. Draw order in the main pass is opaque first
//! (voxel shapes, voxboxes, ropes) and water last so its alpha blend sees
//! the finished opaque frame.

use crate::{context::Context, scene::gpu::GpuScene};

pub fn render_frame(ctx: &Context, scene: &GpuScene) -> Result<(), wgpu::SurfaceError> {
    let output = ctx.surface.get_current_texture()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    {
        let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &ctx.sun.shadow_map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        shadow_pass.set_pipeline(&ctx.pipelines.shadow);
        shadow_pass.set_bind_group(0, &ctx.sun.pass_bind_group, &[]);
        scene.draw(&mut shadow_pass);
    }

    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(ctx.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &ctx.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);

        render_pass.set_pipeline(&ctx.pipelines.voxel);
        render_pass.set_bind_group(3, &ctx.sun.shade_bind_group, &[]);
        scene.draw(&mut render_pass);

        render_pass.set_pipeline(&ctx.pipelines.voxbox);
        render_pass.set_bind_group(2, &ctx.sun.shade_bind_group, &[]);
        scene.draw_voxboxes(&mut render_pass);

        render_pass.set_pipeline(&ctx.pipelines.rope);
        scene.draw_ropes(&mut render_pass);

        render_pass.set_pipeline(&ctx.pipelines.water);
        scene.draw_water(&mut render_pass);
    }

    ctx.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    Ok(())
}
