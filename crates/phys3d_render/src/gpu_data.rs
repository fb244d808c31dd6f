//! GPU-compatible data types and buffers
//!
//! Vertex and matrix types derive Pod and Zeroable so they can be uploaded
//! with bytemuck. Mesh buffers hold one vertex and one u32 index buffer;
//! constant buffers hold a single uniform block bound at the group index of
//! their [`ShaderSlot`].

use bytemuck::{Pod, Zeroable};
use phys3d_math::{mat4, Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::pipeline::InputElement;

/// A vertex with position and color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
}

/// Layout elements matching [`Vertex`]
pub const VERTEX_ELEMENTS: [InputElement; 2] = [InputElement::Position, InputElement::Color];

impl Vertex {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Indexed triangle mesh
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Axis-aligned cube centered on the origin
    ///
    /// Corners are shaded darker towards -x/-y/-z so faces stay distinct
    /// without lighting. Faces wind clockwise seen from outside.
    pub fn cube(size: f32, color: [f32; 4]) -> Self {
        let h = size / 2.0;
        let corners = [
            [-h, -h, -h],
            [h, -h, -h],
            [h, h, -h],
            [-h, h, -h],
            [-h, -h, h],
            [h, -h, h],
            [h, h, h],
            [-h, h, h],
        ];

        let vertices = corners
            .iter()
            .map(|&p| {
                let sign_sum: f32 = p.iter().map(|c| c.signum()).sum();
                Vertex::new(p, shade(color, 0.7 + 0.1 * sign_sum))
            })
            .collect();

        #[rustfmt::skip]
        let indices = vec![
            4, 6, 5, 4, 7, 6, // +z
            0, 1, 2, 0, 2, 3, // -z
            1, 6, 2, 1, 5, 6, // +x
            0, 3, 7, 0, 7, 4, // -x
            3, 2, 6, 3, 6, 7, // +y
            0, 5, 1, 0, 4, 5, // -y
        ];

        Self { vertices, indices }
    }

    /// Square in the XZ plane facing +y, centered on the origin
    pub fn plane(size: f32, color: [f32; 4]) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Vertex::new([-h, 0.0, -h], color),
            Vertex::new([h, 0.0, -h], color),
            Vertex::new([h, 0.0, h], color),
            Vertex::new([-h, 0.0, h], color),
        ];

        Self {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Vertex positions as vectors
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| Vec3::from_array(v.position))
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn shade(color: [f32; 4], factor: f32) -> [f32; 4] {
    [color[0] * factor, color[1] * factor, color[2] * factor, color[3]]
}

/// A 4x4 matrix constant payload
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Matrix {
    pub data: Mat4,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            data: mat4::IDENTITY,
        }
    }
}

impl From<Mat4> for Matrix {
    fn from(data: Mat4) -> Self {
        Self { data }
    }
}

/// Shader stage a constant buffer is visible to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl ShaderStage {
    pub fn visibility(self) -> wgpu::ShaderStages {
        match self {
            ShaderStage::Vertex => wgpu::ShaderStages::VERTEX,
            ShaderStage::Pixel => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

/// Constant buffer slots, used as bind group indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderSlot {
    Projection = 0,
    View = 1,
    Transform = 2,
}

impl ShaderSlot {
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Size and placement of one block of mesh data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferInfo<'a> {
    pub byte_size: u32,
    pub count: u32,
    pub offset: u32,
    pub data: &'a [u8],
}

impl BufferInfo<'_> {
    /// Bytes per element
    pub fn stride(&self) -> u32 {
        if self.count == 0 {
            0
        } else {
            self.byte_size / self.count
        }
    }
}

/// Vertex and index data ready for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshBufferDesc<'a> {
    pub vertex_info: BufferInfo<'a>,
    pub index_info: BufferInfo<'a>,
}

impl<'a> MeshBufferDesc<'a> {
    pub fn from_mesh(mesh: &'a Mesh) -> Self {
        let vertex_data: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        let index_data: &[u8] = bytemuck::cast_slice(&mesh.indices);

        Self {
            vertex_info: BufferInfo {
                byte_size: vertex_data.len() as u32,
                count: mesh.vertices.len() as u32,
                offset: 0,
                data: vertex_data,
            },
            index_info: BufferInfo {
                byte_size: index_data.len() as u32,
                count: mesh.indices.len() as u32,
                offset: 0,
                data: index_data,
            },
        }
    }
}

/// Vertex and index buffers for one mesh
pub struct MeshBuffer {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_offset: u64,
    vertex_stride: u32,
    index_offset: u64,
    index_count: u32,
}

impl MeshBuffer {
    pub fn new(device: &wgpu::Device, desc: &MeshBufferDesc<'_>) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: desc.vertex_info.data,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: desc.index_info.data,
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            vertex_offset: desc.vertex_info.offset as u64,
            vertex_stride: desc.vertex_info.stride(),
            index_offset: desc.index_info.offset as u64,
            index_count: desc.index_info.count,
        }
    }

    /// Bind vertex slot 0 and the u32 index buffer
    pub fn activate(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(self.vertex_offset..));
        pass.set_index_buffer(
            self.index_buffer.slice(self.index_offset..),
            wgpu::IndexFormat::Uint32,
        );
    }

    /// Draw every index
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_stride(&self) -> u32 {
        self.vertex_stride
    }
}

/// Bind group layout shared by every constant buffer of a stage
///
/// Pipelines and constant buffers each build this layout; identical layouts
/// are compatible, so buffers bind to any pipeline using the same stage.
pub fn constant_buffer_layout(device: &wgpu::Device, stage: ShaderStage) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Constant Buffer Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: stage.visibility(),
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Parameters for a constant buffer
#[derive(Debug, Clone, Copy)]
pub struct ConstantBufferDesc<'a> {
    pub stage: ShaderStage,
    pub slot: ShaderSlot,
    /// Capacity in bytes
    pub size: u64,
    /// Initial contents, at most `size` bytes
    pub data: &'a [u8],
}

impl<'a> ConstantBufferDesc<'a> {
    /// Vertex-stage matrix buffer for `slot`
    pub fn matrix(slot: ShaderSlot, matrix: &'a Matrix) -> Self {
        Self {
            stage: ShaderStage::Vertex,
            slot,
            size: std::mem::size_of::<Matrix>() as u64,
            data: bytemuck::bytes_of(matrix),
        }
    }
}

/// A uniform block bound at a fixed slot
pub struct ConstantBuffer {
    stage: ShaderStage,
    slot: ShaderSlot,
    size: u64,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ConstantBuffer {
    pub fn new(device: &wgpu::Device, desc: &ConstantBufferDesc<'_>) -> Result<Self, RenderError> {
        check_capacity(desc.size, desc.data.len())?;

        // Uniform bindings are sized in 16-byte steps
        let padded = wgpu::util::align_to(desc.size.max(16), 16);
        let mut contents = vec![0u8; padded as usize];
        contents[..desc.data.len()].copy_from_slice(desc.data);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Constant Buffer"),
            contents: &contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = constant_buffer_layout(device, desc.stage);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Constant Buffer Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            stage: desc.stage,
            slot: desc.slot,
            size: desc.size,
            buffer,
            bind_group,
        })
    }

    /// Bind at the group index of this buffer's slot
    pub fn activate(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(self.slot.index(), &self.bind_group, &[]);
    }

    /// Overwrite the start of the buffer with `data`
    pub fn update(&self, queue: &wgpu::Queue, data: &[u8]) -> Result<(), RenderError> {
        check_capacity(self.size, data.len())?;

        let aligned = wgpu::util::align_to(data.len(), wgpu::COPY_BUFFER_ALIGNMENT as usize);
        if aligned == data.len() {
            queue.write_buffer(&self.buffer, 0, data);
        } else {
            let mut padded = data.to_vec();
            padded.resize(aligned, 0);
            queue.write_buffer(&self.buffer, 0, &padded);
        }
        Ok(())
    }

    pub fn update_matrix(&self, queue: &wgpu::Queue, matrix: &Matrix) -> Result<(), RenderError> {
        self.update(queue, bytemuck::bytes_of(matrix))
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn slot(&self) -> ShaderSlot {
        self.slot
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

fn check_capacity(capacity: u64, requested: usize) -> Result<(), RenderError> {
    if requested as u64 > capacity {
        return Err(RenderError::ConstantOverflow {
            capacity,
            requested: requested as u64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        assert_eq!(std::mem::size_of::<Matrix>(), 64);
    }

    #[test]
    fn test_vertex_elements_match_layout() {
        let layout = crate::pipeline::InputLayout::new(&VERTEX_ELEMENTS);
        assert_eq!(layout.stride(), std::mem::size_of::<Vertex>() as u64);
    }

    #[test]
    fn test_cube_mesh() {
        let cube = Mesh::cube(2.0, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
        assert!(cube.vertices.iter().all(|v| v.color[3] == 1.0));
        assert!(cube.positions().all(|p| p.x.abs() == 1.0 && p.y.abs() == 1.0 && p.z.abs() == 1.0));
    }

    #[test]
    fn test_cube_faces_wind_clockwise_from_outside() {
        let cube = Mesh::cube(1.0, [1.0; 4]);
        for tri in cube.indices.chunks(3) {
            let a = Vec3::from_array(cube.vertices[tri[0] as usize].position);
            let b = Vec3::from_array(cube.vertices[tri[1] as usize].position);
            let c = Vec3::from_array(cube.vertices[tri[2] as usize].position);
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) * (1.0 / 3.0);
            assert!(normal.dot(center) < 0.0, "triangle {:?} winds outward", tri);
        }
    }

    #[test]
    fn test_plane_mesh() {
        let plane = Mesh::plane(10.0, [0.3, 0.3, 0.3, 1.0]);
        assert_eq!(plane.vertices.len(), 4);
        assert_eq!(plane.triangle_count(), 2);
        assert!(plane.positions().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_mesh_buffer_desc() {
        let cube = Mesh::cube(1.0, [1.0; 4]);
        let desc = MeshBufferDesc::from_mesh(&cube);

        assert_eq!(desc.vertex_info.count, 8);
        assert_eq!(desc.vertex_info.byte_size, 8 * 28);
        assert_eq!(desc.vertex_info.stride(), 28);
        assert_eq!(desc.vertex_info.offset, 0);
        assert_eq!(desc.index_info.count, 36);
        assert_eq!(desc.index_info.byte_size, 36 * 4);
        assert_eq!(desc.index_info.stride(), 4);
        assert_eq!(desc.vertex_info.data.len(), desc.vertex_info.byte_size as usize);
    }

    #[test]
    fn test_empty_mesh_stride() {
        let mesh = Mesh::default();
        let desc = MeshBufferDesc::from_mesh(&mesh);
        assert_eq!(desc.vertex_info.stride(), 0);
    }

    #[test]
    fn test_constant_capacity() {
        assert!(check_capacity(64, 64).is_ok());
        assert!(matches!(
            check_capacity(64, 65),
            Err(RenderError::ConstantOverflow {
                capacity: 64,
                requested: 65
            })
        ));
    }

    #[test]
    fn test_matrix_desc() {
        let matrix = Matrix::from(mat4::translation(Vec3::new(1.0, 2.0, 3.0)));
        let desc = ConstantBufferDesc::matrix(ShaderSlot::Transform, &matrix);
        assert_eq!(desc.size, 64);
        assert_eq!(desc.data.len(), 64);
        assert_eq!(desc.stage, ShaderStage::Vertex);
        assert_eq!(ShaderSlot::Transform.index(), 2);
    }
}
