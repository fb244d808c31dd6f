//! Complete pipeline state

use super::layout::{InputElement, InputLayout};
use super::modes::{
    blend_state, depth_stencil_state, primitive_state, sampler_descriptor, BlendMode,
    DepthStencilMode, RasterizerMode, SamplerMode,
};
use super::shader::{create_shader_module, DEFAULT_SHADER, PIXEL_ENTRY_POINT, VERTEX_ENTRY_POINT};
use crate::error::RenderError;
use crate::gpu_data::{constant_buffer_layout, ShaderStage, VERTEX_ELEMENTS};

/// Everything needed to build a [`Pipeline`]
#[derive(Debug, Clone)]
pub struct PipelineDesc {
    pub blend: BlendMode,
    pub depth_stencil: DepthStencilMode,
    pub rasterizer: RasterizerMode,
    pub sampler: SamplerMode,
    pub primitive_topology: wgpu::PrimitiveTopology,
    pub input_layout: Vec<InputElement>,
    pub vertex_shader_bytecode: Vec<u8>,
    pub pixel_shader_bytecode: Vec<u8>,
    /// Stage of the constant buffer at each slot; index = bind group
    pub constant_stages: Vec<ShaderStage>,
}

impl Default for PipelineDesc {
    fn default() -> Self {
        Self {
            blend: BlendMode::Opaque,
            depth_stencil: DepthStencilMode::ReadWrite,
            rasterizer: RasterizerMode::CullAntiClockwise,
            sampler: SamplerMode::LinearWrap,
            primitive_topology: wgpu::PrimitiveTopology::TriangleList,
            input_layout: VERTEX_ELEMENTS.to_vec(),
            vertex_shader_bytecode: DEFAULT_SHADER.as_bytes().to_vec(),
            pixel_shader_bytecode: DEFAULT_SHADER.as_bytes().to_vec(),
            constant_stages: vec![ShaderStage::Vertex; 3],
        }
    }
}

/// Render target formats a pipeline writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTargets {
    pub color_format: wgpu::TextureFormat,
    pub sample_count: u32,
}

/// A compiled render pipeline plus its sampler
pub struct Pipeline {
    pipeline: wgpu::RenderPipeline,
    sampler: wgpu::Sampler,
    input_layout: InputLayout,
    desc: PipelineDesc,
}

impl Pipeline {
    pub fn new(
        device: &wgpu::Device,
        desc: PipelineDesc,
        targets: PipelineTargets,
    ) -> Result<Self, RenderError> {
        let vertex_shader = create_shader_module(device, "Vertex Shader", &desc.vertex_shader_bytecode)?;
        let pixel_shader = create_shader_module(device, "Pixel Shader", &desc.pixel_shader_bytecode)?;

        let bind_group_layouts: Vec<wgpu::BindGroupLayout> = desc
            .constant_stages
            .iter()
            .map(|&stage| constant_buffer_layout(device, stage))
            .collect();
        let bind_group_layout_refs: Vec<&wgpu::BindGroupLayout> = bind_group_layouts.iter().collect();

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &bind_group_layout_refs,
            push_constant_ranges: &[],
        });

        let mut primitive = primitive_state(desc.rasterizer, desc.primitive_topology);
        if primitive.polygon_mode == wgpu::PolygonMode::Line
            && !device.features().contains(wgpu::Features::POLYGON_MODE_LINE)
        {
            log::warn!("Wireframe not supported by this device, using solid fill");
            primitive.polygon_mode = wgpu::PolygonMode::Fill;
        }

        let input_layout = InputLayout::new(&desc.input_layout);

        // Blobs can pass module validation yet miss an entry point or
        // declare bindings the constant slots don't provide
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some(VERTEX_ENTRY_POINT),
                buffers: &[input_layout.buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &pixel_shader,
                entry_point: Some(PIXEL_ENTRY_POINT),
                targets: &[Some(wgpu::ColorTargetState {
                    format: targets.color_format,
                    blend: blend_state(desc.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive,
            depth_stencil: Some(depth_stencil_state(desc.depth_stencil)),
            multisample: wgpu::MultisampleState {
                count: targets.sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::Shader(format!("Render pipeline: {}", error)));
        }

        let sampler = device.create_sampler(&sampler_descriptor(desc.sampler));

        log::info!(
            "Created pipeline: blend {:?}, depth {:?}, rasterizer {:?}, sampler {:?}, {} samples",
            desc.blend,
            desc.depth_stencil,
            desc.rasterizer,
            desc.sampler,
            targets.sample_count
        );

        Ok(Self {
            pipeline,
            sampler,
            input_layout,
            desc,
        })
    }

    /// Bind the pipeline for the following draws
    pub fn activate(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn input_layout(&self) -> &InputLayout {
        &self.input_layout
    }

    pub fn desc(&self) -> &PipelineDesc {
        &self.desc
    }
}
