//! Pipeline state construction
//!
//! Blend, depth-stencil, rasterizer and sampler state are chosen from small
//! enumerations and translated to wgpu descriptors through fixed tables.
//! [`Pipeline`] bundles the resulting state with an input layout and a
//! vertex/pixel shader pair.

pub mod layout;
pub mod modes;
pub mod shader;
pub mod state;

pub use layout::{InputElement, InputLayout};
pub use modes::{
    blend_state, depth_stencil_state, primitive_state, sampler_descriptor, BlendMode,
    DepthStencilMode, RasterizerMode, SamplerMode, DEPTH_STENCIL_FORMAT,
};
pub use shader::{create_shader_module, read_binary_file, shader_source_from_bytes, DEFAULT_SHADER};
pub use state::{Pipeline, PipelineDesc, PipelineTargets};
