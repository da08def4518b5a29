//! Scene loading and composition.
//!
//! A [`Scene`] is the flat, world-space result of parsing a hierarchical
//! scene document: a list of model placements, a deduplicating model
//! registry, and the auxiliary renderables (voxboxes, at most one water
//! body, ropes). Parsing is synchronous and happens once at load time.
//!
//! The [`SceneBackend`] trait is the seam between parsing and GPU object
//! construction: the parser decides *what* to build and the backend decides
//! *how*. [`gpu::GpuBackend`] builds real wgpu resources; tests substitute a
//! recording stub so every parsing rule runs without a graphics device.

pub mod document;
pub mod gpu;
pub mod registry;

use cgmath::{Vector2, Vector3};
use log::info;

use crate::data_structures::transform::Transform;
pub use document::SceneError;
pub use registry::ModelRegistry;

/// Constructs the renderable objects the parser asks for.
///
/// Every side-effecting construction the document can trigger goes through
/// here: loading a voxel model, building a voxbox/water/rope renderable, and
/// creating the per-shape placement binding (the GPU uniform carrying the
/// shape's transform and scale).
pub trait SceneBackend {
    type Model;
    type ShapeBinding;
    type Voxbox;
    type Water;
    type Rope;

    fn load_model(&mut self, path: &str) -> anyhow::Result<Self::Model>;

    fn shape_binding(&mut self, transform: &Transform, scale: f32) -> Self::ShapeBinding;

    fn voxbox(
        &mut self,
        size: Vector3<f32>,
        color: Vector3<f32>,
        transform: &Transform,
    ) -> Self::Voxbox;

    fn water(&mut self, boundary: &[Vector2<f32>], position: Vector3<f32>) -> Self::Water;

    fn rope(
        &mut self,
        points: &[Vector3<f32>],
        color: Vector3<f32>,
        transform: &Transform,
    ) -> Self::Rope;
}

/// One placed voxel model: the resolved file path, an optional sub-object
/// selector, the composed world transform, and the uniform scale.
///
/// Created once during parse, immutable afterwards.
pub struct ShapePlacement<S> {
    pub file: String,
    pub object: Option<String>,
    pub transform: Transform,
    pub scale: f32,
    pub binding: S,
}

/// The parsed scene: shape placements, model registry, and auxiliary
/// renderables, all owned by value so destruction is automatic.
pub struct Scene<B: SceneBackend> {
    pub shapes: Vec<ShapePlacement<B::ShapeBinding>>,
    pub models: ModelRegistry<B::Model>,
    pub voxboxes: Vec<B::Voxbox>,
    pub water: Option<B::Water>,
    pub ropes: Vec<B::Rope>,
}

impl<B: SceneBackend> Scene<B> {
    pub(crate) fn empty() -> Self {
        Self {
            shapes: Vec::new(),
            models: ModelRegistry::new(),
            voxboxes: Vec::new(),
            water: None,
            ropes: Vec::new(),
        }
    }

    /// Load a scene document from disk.
    ///
    /// A file that cannot be read is not an error: the warning is logged and
    /// an empty scene is returned, so the caller proceeds with zero shapes.
    /// Authoring errors inside a readable document (missing `file` on a
    /// `vox`, malformed numbers) abort the load with a [`SceneError`].
    pub fn load(path: &str, backend: &mut B) -> Result<Self, SceneError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("scene file {} not found or unreadable: {}", path, e);
                return Ok(Self::empty());
            }
        };
        // The document folder, trailing separator included; MOD/ paths
        // resolve against it.
        let folder = match path.rfind(['/', '\\']) {
            Some(idx) => &path[..=idx],
            None => "",
        };
        Self::from_str(&text, folder, backend)
    }

    /// Parse a scene document from a string, resolving `MOD/` paths against
    /// `folder` (trailing separator expected).
    pub fn from_str(text: &str, folder: &str, backend: &mut B) -> Result<Self, SceneError> {
        let doc = match roxmltree::Document::parse(text) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("scene document is corrupted: {}", e);
                return Ok(Self::empty());
            }
        };

        let scene = document::Loader::new(backend, folder).run(doc.root_element())?;
        info!(
            "loaded {} shapes, {} voxboxes, {} water, {} ropes",
            scene.shapes.len(),
            scene.voxboxes.len(),
            if scene.water.is_some() { 1 } else { 0 },
            scene.ropes.len()
        );
        Ok(scene)
    }
}
