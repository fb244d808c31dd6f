//! 3D Rendering Library
//!
//! This crate provides the wgpu-based rendering for the phys3d demo: pipeline
//! state built from enumerated modes, GPU mesh and constant buffers, and a
//! render pass that draws into the window surface.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::Pipeline`] - Blend, depth, rasterizer, sampler and shader state
//! - [`gpu_data`] - Vertex/mesh types, mesh buffers and constant buffers
//! - [`render_pass::RenderPass`] - Viewport, depth-stencil and MSAA targets
//! - [`renderer::Renderer`] - Per-frame draw of a set of meshes
//! - [`camera::Camera`] - Fly camera producing view and projection matrices

pub mod camera;
pub mod context;
pub mod error;
pub mod gpu_data;
pub mod pipeline;
pub mod render_pass;
pub mod renderer;

pub use camera::Camera;
pub use error::RenderError;
pub use gpu_data::{Matrix, Mesh, ShaderSlot, ShaderStage, Vertex};
pub use renderer::{DrawItemKey, Renderer, RendererSettings};

// Re-export math types for convenience
pub use phys3d_math::{Mat4, Vec3};
