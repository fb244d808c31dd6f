//! Per-frame drawing of a set of meshes
//!
//! Every mesh is a draw item owning its vertex/index buffers and a transform
//! constant buffer. Projection and view buffers are shared by all items.

use std::sync::Arc;

use phys3d_math::Mat4;
use slotmap::{new_key_type, SlotMap};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::camera::Camera;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::gpu_data::{ConstantBuffer, ConstantBufferDesc, Matrix, Mesh, MeshBuffer, MeshBufferDesc, ShaderSlot};
use crate::pipeline::{Pipeline, PipelineDesc, PipelineTargets};
use crate::render_pass::RenderPass;

new_key_type! {
    /// Handle to a mesh added to a [`Renderer`]
    pub struct DrawItemKey;
}

/// Clear color used when none is configured
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

/// Renderer construction parameters
#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub clear_color: [f32; 4],
    pub vsync: bool,
    pub pipeline: PipelineDesc,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            vsync: true,
            pipeline: PipelineDesc::default(),
        }
    }
}

struct DrawItem {
    mesh: MeshBuffer,
    transform: ConstantBuffer,
}

/// Draws meshes into a window surface
pub struct Renderer {
    context: RenderContext,
    pass: RenderPass,
    pipeline: Pipeline,
    projection: ConstantBuffer,
    view: ConstantBuffer,
    items: SlotMap<DrawItemKey, DrawItem>,
    clear_color: [f32; 4],
}

impl Renderer {
    /// Create the device, render targets and pipeline for `window`
    pub fn new(window: Arc<Window>, settings: RendererSettings) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, settings.vsync))?;
        let pass = RenderPass::new(&context);

        let pipeline = Pipeline::new(
            &context.device,
            settings.pipeline,
            PipelineTargets {
                color_format: context.config.format,
                sample_count: pass.sample_count(),
            },
        )?;

        let identity = Matrix::default();
        let projection = ConstantBuffer::new(
            &context.device,
            &ConstantBufferDesc::matrix(ShaderSlot::Projection, &identity),
        )?;
        let view = ConstantBuffer::new(
            &context.device,
            &ConstantBufferDesc::matrix(ShaderSlot::View, &identity),
        )?;

        Ok(Self {
            context,
            pass,
            pipeline,
            projection,
            view,
            items: SlotMap::with_key(),
            clear_color: settings.clear_color,
        })
    }

    /// Upload a mesh and return its handle
    pub fn add_mesh(&mut self, mesh: &Mesh, transform: Mat4) -> Result<DrawItemKey, RenderError> {
        let device = &self.context.device;
        let mesh_buffer = MeshBuffer::new(device, &MeshBufferDesc::from_mesh(mesh));
        let matrix = Matrix::from(transform);
        let transform = ConstantBuffer::new(
            device,
            &ConstantBufferDesc::matrix(ShaderSlot::Transform, &matrix),
        )?;

        log::debug!(
            "Uploaded mesh with {} vertices and {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );

        Ok(self.items.insert(DrawItem {
            mesh: mesh_buffer,
            transform,
        }))
    }

    pub fn remove_mesh(&mut self, key: DrawItemKey) -> bool {
        self.items.remove(key).is_some()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Replace the model transform of a draw item
    pub fn set_transform(&mut self, key: DrawItemKey, transform: Mat4) -> Result<(), RenderError> {
        let item = self
            .items
            .get(key)
            .ok_or_else(|| RenderError::Other(format!("Unknown draw item {:?}", key)))?;
        item.transform
            .update_matrix(&self.context.queue, &Matrix::from(transform))
    }

    /// Resize the surface and rebuild the render targets
    pub fn on_resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.pass = RenderPass::new(&self.context);
    }

    /// Reconfigure the surface at its current size after it was lost
    pub fn reconfigure(&mut self) {
        self.on_resize(self.context.size);
    }

    pub fn set_vsync(&mut self, vsync: bool) {
        self.context.set_vsync(vsync);
    }

    pub fn vsync(&self) -> bool {
        self.context.vsync()
    }

    pub fn set_clear_color(&mut self, clear_color: [f32; 4]) {
        self.clear_color = clear_color;
    }

    /// Write the camera's projection and view matrices
    pub fn update(&mut self, camera: &Camera) -> Result<(), RenderError> {
        let projection = camera.projection_matrix(self.context.aspect_ratio());
        self.projection
            .update_matrix(&self.context.queue, &Matrix::from(projection))?;
        self.view
            .update_matrix(&self.context.queue, &Matrix::from(camera.view_matrix()))
    }

    /// Render and present one frame
    pub fn draw(&mut self) -> Result<(), RenderError> {
        let output = self.context.surface.get_current_texture()?;
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = self.pass.begin(&mut encoder, &target, self.clear_color);
            self.pipeline.activate(&mut pass);
            self.projection.activate(&mut pass);
            self.view.activate(&mut pass);

            for item in self.items.values() {
                item.transform.activate(&mut pass);
                item.mesh.activate(&mut pass);
                item.mesh.draw(&mut pass);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
