//! MagicaVoxel model loading.
//!
//! A `.vox` file holds one or more voxel grids plus a scene graph of
//! transform/group/shape nodes naming and positioning them. Each shape
//! becomes a [`VoxObject`]: an instance buffer of its voxels and a bind
//! group carrying its grid offset and the file's shared palette.
//!
//! MagicaVoxel is z-up; everything is converted to y-up on load by swapping
//! the y and z components.

use cgmath::{Vector3, Zero};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        texture::Texture,
        voxel::{VoxelInstance, VoxelRender},
    },
    pipelines::SharedLayouts,
};

pub struct VoxModel {
    pub objects: Vec<VoxObject>,
    #[allow(unused)]
    palette: Texture,
}

pub struct VoxObject {
    pub name: Option<String>,
    render: VoxelRender,
    bind_group: wgpu::BindGroup,
    #[allow(unused)]
    offset_buffer: wgpu::Buffer,
}

impl VoxModel {
    /// Draw the whole model, or only the sub-objects matching `object`.
    ///
    /// The placement bind group is already set by the caller; this sets each
    /// object's own group (offset + palette) and issues the instanced draw.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, object: Option<&str>) {
        for obj in &self.objects {
            if let Some(wanted) = object {
                if obj.name.as_deref() != Some(wanted) {
                    continue;
                }
            }
            render_pass.set_bind_group(2, &obj.bind_group, &[]);
            obj.render.draw(render_pass);
        }
    }
}

pub fn load_vox_model(
    path: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layouts: &SharedLayouts,
) -> anyhow::Result<VoxModel> {
    let data = dot_vox::load(path).map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;

    let colors = data
        .palette
        .iter()
        .map(|c| [c.r, c.g, c.b, c.a])
        .collect::<Vec<_>>();
    let palette = Texture::from_palette(device, queue, &colors);

    let mut shapes = Vec::new();
    if data.scenes.is_empty() {
        // no scene graph, every grid sits centered at the origin
        for (model_id, _) in data.models.iter().enumerate() {
            shapes.push(PlacedShape {
                name: None,
                translation: Vector3::zero(),
                model_id,
            });
        }
    } else {
        collect_shapes(&data, 0, Vector3::zero(), None, &mut shapes);
    }

    let objects = shapes
        .into_iter()
        .filter_map(|shape| {
            let Some(model) = data.models.get(shape.model_id) else {
                log::warn!("{}: shape references missing grid {}", path, shape.model_id);
                return None;
            };
            Some(mk_object(device, layouts, &palette, shape, model))
        })
        .collect();

    Ok(VoxModel { objects, palette })
}

struct PlacedShape {
    name: Option<String>,
    /// Grid center in vox coordinates (z-up).
    translation: Vector3<i32>,
    model_id: usize,
}

/// Depth-first walk over the file's scene graph, accumulating translations
/// and the innermost `_name` attribute down to every shape node.
fn collect_shapes(
    data: &dot_vox::DotVoxData,
    node: u32,
    translation: Vector3<i32>,
    name: Option<String>,
    out: &mut Vec<PlacedShape>,
) {
    match data.scenes.get(node as usize) {
        Some(dot_vox::SceneNode::Transform {
            attributes,
            frames,
            child,
            ..
        }) => {
            let translation = match frames.first().and_then(dot_vox::Frame::position) {
                Some(p) => translation + Vector3::new(p.x, p.y, p.z),
                None => translation,
            };
            let name = attributes.get("_name").cloned().or(name);
            collect_shapes(data, *child, translation, name, out);
        }
        Some(dot_vox::SceneNode::Group { children, .. }) => {
            for child in children {
                collect_shapes(data, *child, translation, name.clone(), out);
            }
        }
        Some(dot_vox::SceneNode::Shape { models, .. }) => {
            for shape_model in models {
                out.push(PlacedShape {
                    name: name.clone(),
                    translation,
                    model_id: shape_model.model_id as usize,
                });
            }
        }
        None => log::warn!("scene graph references missing node {}", node),
    }
}

fn mk_object(
    device: &wgpu::Device,
    layouts: &SharedLayouts,
    palette: &Texture,
    shape: PlacedShape,
    model: &dot_vox::Model,
) -> VoxObject {
    // vox voxels are y/z swapped into engine space
    let voxels = model
        .voxels
        .iter()
        .map(|v| VoxelInstance {
            position: [v.x, v.z, v.y],
            palette: v.i,
        })
        .collect::<Vec<_>>();
    let render = VoxelRender::new(device, &voxels);

    // the translation names the grid's center, the grid itself starts at its
    // corner
    let offset = Vector3::new(
        shape.translation.x as f32 - model.size.x as f32 / 2.0,
        shape.translation.z as f32 - model.size.z as f32 / 2.0,
        shape.translation.y as f32 - model.size.y as f32 / 2.0,
    );
    let offset_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Vox Object Offset Buffer"),
        contents: bytemuck::cast_slice(&[[offset.x, offset.y, offset.z, 0.0f32]]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &layouts.object,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: offset_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&palette.view),
            },
        ],
        label: Some("vox_object_bind_group"),
    });

    VoxObject {
        name: shape.name,
        render,
        bind_group,
        offset_buffer,
    }
}
