//! Shader blob loading
//!
//! A blob is either SPIR-V (recognised by its magic number) or UTF-8 WGSL
//! source. Vertex shaders use the `vs_main` entry point, pixel shaders
//! `fs_main`.

use std::path::Path;

use crate::error::RenderError;

/// Built-in shader pair used when no blobs are configured
pub const DEFAULT_SHADER: &str = include_str!("../../shaders/basic.wgsl");

/// First word of every SPIR-V module
pub const SPIRV_MAGIC: u32 = 0x0723_0203;

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const PIXEL_ENTRY_POINT: &str = "fs_main";

/// Read a whole file into memory
pub fn read_binary_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, RenderError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

fn is_spirv(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) == SPIRV_MAGIC
}

/// Interpret a blob as a shader source
pub fn shader_source_from_bytes(bytes: &[u8]) -> Result<wgpu::ShaderSource<'_>, RenderError> {
    if bytes.is_empty() {
        return Err(RenderError::Shader("empty shader blob".to_string()));
    }

    if is_spirv(bytes) {
        if bytes.len() % 4 != 0 {
            return Err(RenderError::Shader(format!(
                "SPIR-V blob length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        return Ok(wgpu::util::make_spirv(bytes));
    }

    let source = std::str::from_utf8(bytes)
        .map_err(|e| RenderError::Shader(format!("blob is neither SPIR-V nor UTF-8 WGSL: {}", e)))?;
    Ok(wgpu::ShaderSource::Wgsl(source.into()))
}

/// Compile a blob into a shader module
///
/// Validation errors are captured and returned instead of reaching the
/// device's uncaptured error handler.
pub fn create_shader_module(
    device: &wgpu::Device,
    label: &str,
    bytes: &[u8],
) -> Result<wgpu::ShaderModule, RenderError> {
    let source = shader_source_from_bytes(bytes)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source,
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(error) => Err(RenderError::Shader(format!("{}: {}", label, error))),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgsl_source() {
        let source = shader_source_from_bytes(DEFAULT_SHADER.as_bytes()).unwrap();
        assert!(matches!(source, wgpu::ShaderSource::Wgsl(_)));
    }

    #[test]
    fn test_default_shader_entry_points() {
        assert!(DEFAULT_SHADER.contains(VERTEX_ENTRY_POINT));
        assert!(DEFAULT_SHADER.contains(PIXEL_ENTRY_POINT));
    }

    #[test]
    fn test_spirv_detection() {
        let mut blob = SPIRV_MAGIC.to_le_bytes().to_vec();
        blob.extend_from_slice(&[0; 16]);
        assert!(is_spirv(&blob));
        assert!(!is_spirv(b"@vertex fn vs_main() {}"));
        assert!(!is_spirv(&[0x03, 0x02]));
    }

    #[test]
    fn test_truncated_spirv_rejected() {
        let mut blob = SPIRV_MAGIC.to_le_bytes().to_vec();
        blob.push(0);
        assert!(matches!(shader_source_from_bytes(&blob), Err(RenderError::Shader(_))));
    }

    #[test]
    fn test_invalid_blobs_rejected() {
        assert!(matches!(shader_source_from_bytes(&[]), Err(RenderError::Shader(_))));
        assert!(matches!(
            shader_source_from_bytes(&[0xff, 0xfe, 0xfd]),
            Err(RenderError::Shader(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_binary_file("does/not/exist.spv");
        assert!(matches!(result, Err(RenderError::Io(_))));
    }

    #[test]
    fn test_read_binary_file() {
        let path = std::env::temp_dir().join("phys3d_shader_blob_test.bin");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();
        assert_eq!(read_binary_file(&path).unwrap(), vec![1, 2, 3, 4]);
        std::fs::remove_file(&path).unwrap();
    }
}
