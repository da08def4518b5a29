//! The scene document parser.
//!
//! Walks the markup document recursively: every element may carry `pos` and
//! `rot` attributes which are composed with the inherited parent transform,
//! then the element is dispatched on its tag name. Unrecognized tags produce
//! nothing but their children are still visited so transforms keep
//! propagating down the hierarchy.
//!
//! Malformed numeric attributes fail the load with an error naming the
//! element, attribute, and offending text; a document that cannot be read or
//! parsed at all is non-fatal and yields an empty scene (handled by the
//! caller in [`Scene::load`](crate::scene::Scene::load)).

use cgmath::{One, Quaternion, Vector2, Vector3, Zero};
use log::warn;
use thiserror::Error;

use crate::{
    data_structures::transform::{Transform, rotation_from_euler_deg},
    scene::{Scene, SceneBackend, ShapePlacement},
};

/// A structured scene-loading failure. All variants abort the load; the
/// caller decides whether that kills the process (the viewer does, an editor
/// would not).
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("element <{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("invalid value \"{value}\" for attribute `{attribute}` on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },
    #[error("failed to load model \"{path}\"")]
    Model {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// The closed set of recognized element kinds, decided once per element
/// instead of string-comparing in every branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ElementKind {
    Vox,
    Voxbox,
    Water,
    Rope,
    Other,
}

impl ElementKind {
    // Tag matching is case-sensitive.
    fn from_tag(name: &str) -> Self {
        match name {
            "vox" => Self::Vox,
            "voxbox" => Self::Voxbox,
            "water" => Self::Water,
            "rope" => Self::Rope,
            _ => Self::Other,
        }
    }
}

/// Parse exactly `N` whitespace-separated floats out of an attribute value.
fn parse_floats<const N: usize>(
    element: &str,
    attribute: &'static str,
    value: &str,
) -> Result<[f32; N], SceneError> {
    let invalid = || SceneError::InvalidAttribute {
        element: element.to_string(),
        attribute,
        value: value.to_string(),
    };
    let fields = value.split_whitespace().collect::<Vec<_>>();
    if fields.len() != N {
        return Err(invalid());
    }
    let mut out = [0.0; N];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = field.parse().map_err(|_| invalid())?;
    }
    Ok(out)
}

/// Read an optional `N`-float attribute from an element.
fn attr_floats<const N: usize>(
    node: roxmltree::Node<'_, '_>,
    attribute: &'static str,
) -> Result<Option<[f32; N]>, SceneError> {
    node.attribute(attribute)
        .map(|value| parse_floats(node.tag_name().name(), attribute, value))
        .transpose()
}

pub(crate) struct Loader<'b, B: SceneBackend> {
    backend: &'b mut B,
    folder: String,
    scene: Scene<B>,
}

impl<'b, B: SceneBackend> Loader<'b, B> {
    pub(crate) fn new(backend: &'b mut B, folder: &str) -> Self {
        Self {
            backend,
            folder: folder.to_string(),
            scene: Scene::empty(),
        }
    }

    pub(crate) fn run(mut self, root: roxmltree::Node<'_, '_>) -> Result<Scene<B>, SceneError> {
        self.visit(root, &Transform::identity())?;
        Ok(self.scene)
    }

    /// Visit one element: compose its transform, dispatch on its kind, then
    /// recurse into every child with the composed transform as the parent.
    fn visit(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        parent: &Transform,
    ) -> Result<(), SceneError> {
        let position = attr_floats::<3>(node, "pos")?
            .map(Vector3::from)
            .unwrap_or_else(Vector3::zero);
        let rotation = attr_floats::<3>(node, "rot")?
            .map(|[x, y, z]| rotation_from_euler_deg(x, y, z))
            .unwrap_or_else(Quaternion::one);
        let transform = parent.compose(position, rotation);

        match ElementKind::from_tag(node.tag_name().name()) {
            ElementKind::Vox => self.visit_vox(node, &transform)?,
            ElementKind::Voxbox => self.visit_voxbox(node, &transform)?,
            ElementKind::Water => self.visit_water(node, &transform)?,
            ElementKind::Rope => self.visit_rope(node, &transform)?,
            ElementKind::Other => (),
        }

        for child in node.children().filter(roxmltree::Node::is_element) {
            self.visit(child, &transform)?;
        }
        Ok(())
    }

    fn visit_vox(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        transform: &Transform,
    ) -> Result<(), SceneError> {
        let file = node
            .attribute("file")
            .ok_or(SceneError::MissingAttribute {
                element: "vox",
                attribute: "file",
            })?;
        // MOD/ paths are relative to the document's own folder.
        let file = match file.strip_prefix("MOD/") {
            Some(rest) => format!("{}{}", self.folder, rest),
            None => file.to_string(),
        };

        let object = node
            .attribute("object")
            // empty string selects the whole model
            .filter(|object| !object.is_empty())
            .map(str::to_string);

        let scale = match attr_floats::<1>(node, "scale")? {
            Some([scale]) if scale > 0.0 => scale,
            Some(_) => {
                return Err(SceneError::InvalidAttribute {
                    element: "vox".to_string(),
                    attribute: "scale",
                    value: node.attribute("scale").unwrap_or_default().to_string(),
                });
            }
            None => 1.0,
        };

        let backend = &mut *self.backend;
        self.scene
            .models
            .get_or_load(&file, || backend.load_model(&file))
            .map_err(|source| SceneError::Model {
                path: file.clone(),
                source,
            })?;

        let binding = self.backend.shape_binding(transform, scale);
        self.scene.shapes.push(ShapePlacement {
            file,
            object,
            transform: *transform,
            scale,
            binding,
        });
        Ok(())
    }

    fn visit_voxbox(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        transform: &Transform,
    ) -> Result<(), SceneError> {
        let size = attr_floats::<3>(node, "size")?
            .map(Vector3::from)
            .unwrap_or_else(|| Vector3::new(10.0, 10.0, 10.0));
        let color = attr_floats::<3>(node, "color")?
            .map(Vector3::from)
            .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0));

        let voxbox = self.backend.voxbox(size, color, transform);
        self.scene.voxboxes.push(voxbox);
        Ok(())
    }

    fn visit_water(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        transform: &Transform,
    ) -> Result<(), SceneError> {
        let mut boundary = Vec::new();
        for child in node.children().filter(roxmltree::Node::is_element) {
            if child.tag_name().name() != "vertex" {
                continue;
            }
            // vertices without a pos are skipped, not defaulted
            if let Some(point) = attr_floats::<2>(child, "pos")? {
                boundary.push(Vector2::from(point));
            }
        }
        if boundary.len() < 3 {
            return Ok(());
        }
        if self.scene.water.is_some() {
            warn!("too much water! at most one water body per scene, dropping this one");
            return Ok(());
        }
        self.scene.water = Some(self.backend.water(&boundary, transform.position));
        Ok(())
    }

    fn visit_rope(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        transform: &Transform,
    ) -> Result<(), SceneError> {
        let mut points = Vec::new();
        for child in node.children().filter(roxmltree::Node::is_element) {
            if child.tag_name().name() != "location" {
                continue;
            }
            let point = attr_floats::<3>(child, "pos")?
                .map(Vector3::from)
                .unwrap_or_else(Vector3::zero);
            points.push(point);
        }
        if points.len() < 2 {
            return Ok(());
        }
        let color = attr_floats::<3>(node, "color")?
            .map(Vector3::from)
            .unwrap_or_else(Vector3::zero);

        let rope = self.backend.rope(&points, color, transform);
        self.scene.ropes.push(rope);
        Ok(())
    }
}
