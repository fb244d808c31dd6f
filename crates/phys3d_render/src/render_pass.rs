//! Render targets for one frame: viewport, depth-stencil and MSAA color

use crate::context::RenderContext;
use crate::pipeline::DEPTH_STENCIL_FORMAT;

/// Viewport covering the whole surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Depth-stencil and optional multisampled color targets sized to the surface
///
/// Recreate it after the surface is resized.
pub struct RenderPass {
    viewport: Viewport,
    sample_count: u32,
    depth_stencil_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
}

impl RenderPass {
    pub fn new(context: &RenderContext) -> Self {
        let width = context.config.width;
        let height = context.config.height;
        let sample_count = context.supported_msaa_samples();

        let depth_stencil_view = create_target(
            &context.device,
            "Depth Stencil Texture",
            DEPTH_STENCIL_FORMAT,
            width,
            height,
            sample_count,
        );

        let msaa_view = (sample_count > 1).then(|| {
            create_target(
                &context.device,
                "MSAA Color Texture",
                context.config.format,
                width,
                height,
                sample_count,
            )
        });

        log::debug!(
            "Render pass targets {}x{} with {} sample(s)",
            width,
            height,
            sample_count
        );

        Self {
            viewport: Viewport::from_size(width, height),
            sample_count,
            depth_stencil_view,
            msaa_view,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Begin a pass clearing color to `clear_color`, depth to 1 and stencil to 0
    ///
    /// With MSAA the pass renders into the multisampled target and resolves
    /// into `target`.
    pub fn begin<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear_color: [f32; 4],
    ) -> wgpu::RenderPass<'e> {
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa_view) => (msaa_view, Some(target)),
            None => (target, None),
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(to_color(clear_color)),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_stencil_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(0),
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let v = self.viewport;
        pass.set_viewport(v.x, v.y, v.width, v.height, v.min_depth, v.max_depth);
        pass
    }
}

fn create_target(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Convert an RGBA array to a wgpu clear color
pub fn to_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_covers_surface() {
        let viewport = Viewport::from_size(800, 600);
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.height, 600.0);
        assert_eq!((viewport.x, viewport.y), (0.0, 0.0));
        assert_eq!((viewport.min_depth, viewport.max_depth), (0.0, 1.0));
    }

    #[test]
    fn test_to_color() {
        let color = to_color([0.2, 0.2, 0.2, 1.0]);
        assert!((color.r - 0.2).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }
}
