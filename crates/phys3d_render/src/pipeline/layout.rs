//! Vertex input layout

use serde::{Deserialize, Serialize};

/// A per-vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputElement {
    Position,
    Normal,
    Color,
    Texcoord,
}

impl InputElement {
    pub fn format(self) -> wgpu::VertexFormat {
        match self {
            InputElement::Position => wgpu::VertexFormat::Float32x3,
            InputElement::Normal => wgpu::VertexFormat::Float32x3,
            InputElement::Color => wgpu::VertexFormat::Float32x4,
            InputElement::Texcoord => wgpu::VertexFormat::Float32x2,
        }
    }
}

/// Attributes of a single interleaved vertex buffer (slot 0)
///
/// Elements are packed in order; element `i` is read at shader location `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct InputLayout {
    attributes: Vec<wgpu::VertexAttribute>,
    stride: wgpu::BufferAddress,
}

impl InputLayout {
    pub fn new(elements: &[InputElement]) -> Self {
        let mut offset: wgpu::BufferAddress = 0;
        let attributes = elements
            .iter()
            .enumerate()
            .map(|(location, element)| {
                let format = element.format();
                let attribute = wgpu::VertexAttribute {
                    format,
                    offset,
                    shader_location: location as u32,
                };
                offset += format.size();
                attribute
            })
            .collect();

        Self {
            attributes,
            stride: offset,
        }
    }

    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    /// Size of one vertex in bytes
    pub fn stride(&self) -> wgpu::BufferAddress {
        self.stride
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}
