//! Render error types

use std::fmt;

/// Errors raised while setting up or drawing a frame
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// No adapter is compatible with the window surface
    NoAdapter,
    /// Device request failed
    Device(String),
    /// Shader blob could not be loaded
    Shader(String),
    /// Reading a file failed
    Io(std::io::Error),
    /// Constant buffer update larger than the buffer
    ConstantOverflow { capacity: u64, requested: u64 },
    /// Other surface error
    Other(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::NoAdapter => write!(f, "No suitable GPU adapter"),
            RenderError::Device(msg) => write!(f, "Device request failed: {}", msg),
            RenderError::Shader(msg) => write!(f, "Shader error: {}", msg),
            RenderError::Io(e) => write!(f, "IO error: {}", e),
            RenderError::ConstantOverflow {
                capacity,
                requested,
            } => write!(
                f,
                "Constant buffer overflow: {} bytes requested, capacity {}",
                requested, capacity
            ),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!(
                "{}",
                RenderError::ConstantOverflow {
                    capacity: 64,
                    requested: 128
                }
            ),
            "Constant buffer overflow: 128 bytes requested, capacity 64"
        );
    }

    #[test]
    fn test_surface_error_mapping() {
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Lost),
            RenderError::SurfaceLost
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Outdated),
            RenderError::SurfaceLost
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::OutOfMemory),
            RenderError::OutOfMemory
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Timeout),
            RenderError::Other(_)
        ));
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;
        let err = RenderError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(err.source().is_some());
    }
}
