//! The wgpu scene backend and the GPU scene's draw entry points.
//!
//! Each `vox` placement owns a small uniform buffer holding its placement
//! matrices (local position/rotation from the document, runtime world
//! position/rotation, uniform scale). Draw calls bind and draw; they never
//! mutate state. The world half of a placement is updated through
//! [`Scene::set_world_transform`], an explicit queue write.

use cgmath::{Vector2, Vector3};
use log::warn;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        rope::RopeRender,
        transform::Transform,
        voxbox::VoxboxRender,
        voxel::PlacementUniform,
        water::WaterRender,
    },
    pipelines::SharedLayouts,
    resources::vox::{VoxModel, load_vox_model},
    scene::{Scene, SceneBackend},
};

/// Per-shape GPU state: the placement uniform buffer and its bind group.
pub struct PlacementGroup {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

/// Builds wgpu-backed renderables for the parser.
///
/// Device and queue handles are internally reference counted, so the backend
/// owns cheap clones and carries no lifetime.
pub struct GpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layouts: SharedLayouts,
}

impl GpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, layouts: &SharedLayouts) -> Self {
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layouts: layouts.clone(),
        }
    }
}

impl SceneBackend for GpuBackend {
    type Model = VoxModel;
    type ShapeBinding = PlacementGroup;
    type Voxbox = VoxboxRender;
    type Water = WaterRender;
    type Rope = RopeRender;

    fn load_model(&mut self, path: &str) -> anyhow::Result<VoxModel> {
        load_vox_model(path, &self.device, &self.queue, &self.layouts)
    }

    fn shape_binding(&mut self, transform: &Transform, scale: f32) -> PlacementGroup {
        let uniform = PlacementUniform::new(transform, &Transform::identity(), scale);
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Placement Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.layouts.placement,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("placement_bind_group"),
        });
        PlacementGroup { buffer, bind_group }
    }

    fn voxbox(
        &mut self,
        size: Vector3<f32>,
        color: Vector3<f32>,
        transform: &Transform,
    ) -> VoxboxRender {
        VoxboxRender::new(&self.device, &self.layouts.placement, size, color, transform)
    }

    fn water(&mut self, boundary: &[Vector2<f32>], position: Vector3<f32>) -> WaterRender {
        WaterRender::new(&self.device, &self.layouts.placement, boundary, position)
    }

    fn rope(
        &mut self,
        points: &[Vector3<f32>],
        color: Vector3<f32>,
        transform: &Transform,
    ) -> RopeRender {
        RopeRender::new(&self.device, &self.layouts.placement, points, color, transform)
    }
}

/// A scene whose renderables live on the GPU.
pub type GpuScene = Scene<GpuBackend>;

impl Scene<GpuBackend> {
    /// Draw every `vox` shape placement.
    ///
    /// The caller has already set the pipeline and the pass-level bind
    /// groups (camera, sun); this binds each shape's placement uniform,
    /// resolves its model from the registry, and forwards the optional
    /// sub-object selector. Used by both the shadow pass and the main pass.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for shape in &self.shapes {
            let Some(model) = self.models.get(&shape.file) else {
                // unreachable by construction, every placement loaded its model
                warn!("no model registered for {}", shape.file);
                continue;
            };
            render_pass.set_bind_group(1, &shape.binding.bind_group, &[]);
            model.draw(render_pass, shape.object.as_deref());
        }
    }

    pub fn draw_voxboxes(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for voxbox in &self.voxboxes {
            voxbox.draw(render_pass);
        }
    }

    pub fn draw_water(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if let Some(water) = &self.water {
            water.draw(render_pass);
        }
    }

    pub fn draw_ropes(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for rope in &self.ropes {
            rope.draw(render_pass);
        }
    }

    /// Re-point a shape's runtime world placement (e.g. the platform a model
    /// rides on). Writes the shape's uniform through the queue; the authored
    /// local placement and scale are preserved. Does not trigger a redraw.
    pub fn set_world_transform(&self, queue: &wgpu::Queue, index: usize, world: &Transform) {
        let Some(shape) = self.shapes.get(index) else {
            warn!("set_world_transform: no shape at index {}", index);
            return;
        };
        let uniform = PlacementUniform::new(&shape.transform, world, shape.scale);
        queue.write_buffer(&shape.binding.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}
