//! Enumerated pipeline modes and their state tables

use serde::{Deserialize, Serialize};

/// Depth-stencil attachment format used by every render pass
pub const DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// How fragment colors combine with the render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Opaque,
    /// Premultiplied alpha
    Alpha,
    Additive,
    NonPremultiplied,
}

/// Depth test and write behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthStencilMode {
    None,
    #[default]
    ReadWrite,
    ReadOnly,
}

/// Face culling and fill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterizerMode {
    CullNone,
    CullClockwise,
    #[default]
    CullAntiClockwise,
    Wireframe,
}

/// Texture filtering and addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerMode {
    PointWrap,
    PointClamp,
    #[default]
    LinearWrap,
    LinearClamp,
    AnisotropicWrap,
    AnisotropicClamp,
}

/// Color blend state for a mode, `None` when blending is a no-op
pub fn blend_state(mode: BlendMode) -> Option<wgpu::BlendState> {
    use wgpu::BlendFactor as F;

    let (src, dst) = match mode {
        BlendMode::Opaque => (F::One, F::Zero),
        BlendMode::Alpha => (F::One, F::OneMinusSrcAlpha),
        BlendMode::Additive => (F::SrcAlpha, F::One),
        BlendMode::NonPremultiplied => (F::SrcAlpha, F::OneMinusSrcAlpha),
    };

    if src == F::One && dst == F::One {
        return None;
    }

    let component = wgpu::BlendComponent {
        src_factor: src,
        dst_factor: dst,
        operation: wgpu::BlendOperation::Add,
    };

    Some(wgpu::BlendState {
        color: component,
        alpha: component,
    })
}

/// Depth-stencil state for a mode
///
/// Stencil testing is always disabled; the attachment format is
/// [`DEPTH_STENCIL_FORMAT`].
pub fn depth_stencil_state(mode: DepthStencilMode) -> wgpu::DepthStencilState {
    let (depth_compare, depth_write_enabled) = match mode {
        DepthStencilMode::None => (wgpu::CompareFunction::Always, false),
        DepthStencilMode::ReadWrite => (wgpu::CompareFunction::LessEqual, true),
        DepthStencilMode::ReadOnly => (wgpu::CompareFunction::LessEqual, false),
    };

    let face = wgpu::StencilFaceState {
        compare: wgpu::CompareFunction::Always,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::Keep,
    };

    wgpu::DepthStencilState {
        format: DEPTH_STENCIL_FORMAT,
        depth_write_enabled,
        depth_compare,
        stencil: wgpu::StencilState {
            front: face,
            back: face,
            read_mask: 0xff,
            write_mask: 0xff,
        },
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Primitive state for a mode
///
/// Clockwise triangles are front faces. Wireframe needs
/// `Features::POLYGON_MODE_LINE`; [`super::Pipeline::new`] falls back to
/// solid fill without it.
pub fn primitive_state(mode: RasterizerMode, topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    let (cull_mode, polygon_mode) = match mode {
        RasterizerMode::CullNone => (None, wgpu::PolygonMode::Fill),
        RasterizerMode::CullClockwise => (Some(wgpu::Face::Front), wgpu::PolygonMode::Fill),
        RasterizerMode::CullAntiClockwise => (Some(wgpu::Face::Back), wgpu::PolygonMode::Fill),
        RasterizerMode::Wireframe => (Some(wgpu::Face::Back), wgpu::PolygonMode::Line),
    };

    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Cw,
        cull_mode,
        unclipped_depth: false,
        polygon_mode,
        conservative: false,
    }
}

/// Maximum anisotropy for the anisotropic modes
pub const MAX_ANISOTROPY: u16 = 16;

/// Sampler descriptor for a mode
pub fn sampler_descriptor(mode: SamplerMode) -> wgpu::SamplerDescriptor<'static> {
    let (filter, anisotropy_clamp) = match mode {
        SamplerMode::PointWrap | SamplerMode::PointClamp => (wgpu::FilterMode::Nearest, 1),
        SamplerMode::LinearWrap | SamplerMode::LinearClamp => (wgpu::FilterMode::Linear, 1),
        SamplerMode::AnisotropicWrap | SamplerMode::AnisotropicClamp => {
            (wgpu::FilterMode::Linear, MAX_ANISOTROPY)
        }
    };

    let address_mode = match mode {
        SamplerMode::PointWrap | SamplerMode::LinearWrap | SamplerMode::AnisotropicWrap => {
            wgpu::AddressMode::Repeat
        }
        SamplerMode::PointClamp | SamplerMode::LinearClamp | SamplerMode::AnisotropicClamp => {
            wgpu::AddressMode::ClampToEdge
        }
    };

    wgpu::SamplerDescriptor {
        label: Some("Pipeline Sampler"),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: filter,
        lod_min_clamp: 0.0,
        lod_max_clamp: f32::MAX,
        compare: None,
        anisotropy_clamp,
        border_color: None,
    }
}
