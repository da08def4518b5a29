//! vox-ngin
//!
//! A lightweight, instancing-oriented voxel rendering engine. Scenes are
//! authored as hierarchical XML documents placing MagicaVoxel models,
//! colored boxes, water bodies and ropes; the loader flattens the hierarchy
//! into world-space placements backed by GPU resources, deduplicating model
//! files along the way. Rendering draws one cube per voxel, instanced, with
//! a directional sun and a shadow map.
//!
//! High-level modules
//! - `camera`: camera types, controller and uniforms for view/projection
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: engine data models (voxel grids, auxiliary renderables, textures)
//! - `pipelines`: render pipeline definitions and the shared bind group layouts
//! - `resources`: loading MagicaVoxel files into GPU resources
//! - `render`: per-frame pass composition (shadow pass, main pass)
//! - `scene`: the XML scene loader, model registry and scene draw calls
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
