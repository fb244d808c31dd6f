//! GPU rendering system
//!
//! Builds the renderer from config and drives it once per frame:
//! - Pipeline description from the configured modes and shader blobs
//! - Draw items for scene meshes
//! - Surface loss recovery

use std::path::Path;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;
use phys3d_math::{Mat4, Vec3};
use phys3d_render::pipeline::{read_binary_file, PipelineDesc};
use phys3d_render::{Camera, DrawItemKey, Mesh, RenderError, Renderer, RendererSettings};
use crate::config::{CameraConfig, RenderingConfig};

/// Manages GPU rendering
pub struct RenderSystem {
    renderer: Renderer,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let settings = renderer_settings(render_config, vsync)?;
        let renderer = Renderer::new(window, settings)?;

        let (width, height) = renderer.size();
        log::info!(
            "Renderer ready: {}x{}, {} sample(s), vsync {}",
            width,
            height,
            renderer.context().supported_msaa_samples(),
            vsync
        );

        Ok(Self { renderer })
    }

    /// Upload a mesh to the GPU
    pub fn add_mesh(&mut self, mesh: &Mesh, transform: Mat4) -> Result<DrawItemKey, RenderError> {
        self.renderer.add_mesh(mesh, transform)
    }

    /// Write new model transforms for the given draw items
    pub fn sync_transforms<I>(&mut self, transforms: I) -> Result<(), RenderError>
    where
        I: IntoIterator<Item = (DrawItemKey, Mat4)>,
    {
        for (key, transform) in transforms {
            self.renderer.set_transform(key, transform)?;
        }
        Ok(())
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.on_resize(PhysicalSize::new(width, height));
    }

    pub fn set_vsync(&mut self, vsync: bool) {
        self.renderer.set_vsync(vsync);
    }

    pub fn vsync(&self) -> bool {
        self.renderer.vsync()
    }

    /// Render a single frame
    ///
    /// A lost surface is reconfigured and the frame skipped. Running out of
    /// memory is returned to the caller.
    pub fn render_frame(&mut self, camera: &Camera) -> Result<(), RenderError> {
        self.renderer.update(camera)?;

        match self.renderer.draw() {
            Err(RenderError::SurfaceLost) => {
                log::warn!("Surface lost, reconfiguring");
                self.renderer.reconfigure();
                Ok(())
            }
            result => result,
        }
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        self.renderer.size()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

/// Translate rendering config into renderer settings
///
/// Shader blobs are read from disk when configured, the built-in shader is
/// used otherwise.
pub fn renderer_settings(
    config: &RenderingConfig,
    vsync: bool,
) -> Result<RendererSettings, RenderError> {
    let mut pipeline = PipelineDesc {
        blend: config.blend,
        depth_stencil: config.depth_stencil,
        rasterizer: config.rasterizer,
        sampler: config.sampler,
        ..PipelineDesc::default()
    };

    if let Some(path) = &config.vertex_shader {
        pipeline.vertex_shader_bytecode = load_shader(path)?;
    }
    if let Some(path) = &config.pixel_shader {
        pipeline.pixel_shader_bytecode = load_shader(path)?;
    }

    Ok(RendererSettings {
        clear_color: config.clear_color,
        vsync,
        pipeline,
    })
}

fn load_shader(path: &Path) -> Result<Vec<u8>, RenderError> {
    read_binary_file(path).map_err(|e| {
        log::error!("Failed to load shader {}: {}", path.display(), e);
        e
    })
}

/// Build the starting camera; config angles are in degrees
pub fn camera_from_config(config: &CameraConfig) -> Camera {
    Camera {
        position: Vec3::from_array(config.start_position),
        yaw: config.yaw.to_radians(),
        pitch: config.pitch.to_radians(),
        fov_y: config.fov.to_radians(),
        near: config.near,
        far: config.far,
    }
}
