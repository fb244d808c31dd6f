//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`P3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use phys3d_render::pipeline::{BlendMode, DepthStencilMode, RasterizerMode, SamplerMode};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`P3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // P3D_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("P3D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// How the window is decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStyle {
    /// Decorated window with a fixed client size
    #[default]
    Normal,
    /// Undecorated window
    Borderless,
    /// Borderless fullscreen on the current monitor
    Fullscreen,
}

impl WindowStyle {
    /// Style after this one, wrapping back to `Normal`
    pub fn next(self) -> Self {
        match self {
            WindowStyle::Normal => WindowStyle::Borderless,
            WindowStyle::Borderless => WindowStyle::Fullscreen,
            WindowStyle::Fullscreen => WindowStyle::Normal,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Window style
    pub style: WindowStyle,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Physics Example".to_string(),
            width: 800,
            height: 600,
            style: WindowStyle::Normal,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Starting yaw in degrees (0 looks down -Z)
    pub yaw: f32,
    /// Starting pitch in degrees
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 2.0, 10.0],
            yaw: 0.0,
            pitch: -10.0,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// Radians per mouse count
    pub mouse_sensitivity: f32,
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable input smoothing by default
    pub smoothing_enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            mouse_sensitivity: 0.002,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration [x, y, z]
    pub gravity: [f32; 3],
    /// Bodies falling below this height go back to their spawn point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_height: Option<f32>,
    /// Longest frame step in seconds; longer frames are clamped
    pub max_frame_time: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.8, 0.0],
            reset_height: Some(-20.0),
            max_frame_time: 0.1,
        }
    }
}

/// Scene layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Floor edge length
    pub floor_size: f32,
    /// Floor height
    pub floor_y: f32,
    /// Floor color [r, g, b, a]
    pub floor_color: [f32; 4],
    /// Cube edge length
    pub cube_size: f32,
    /// Cube color [r, g, b, a]
    pub cube_color: [f32; 4],
    /// Spawn point of each falling cube
    pub cubes: Vec<[f32; 3]>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            floor_size: 20.0,
            floor_y: 0.0,
            floor_color: [0.35, 0.35, 0.4, 1.0],
            cube_size: 1.0,
            cube_color: [0.9, 0.4, 0.1, 1.0],
            cubes: vec![[0.0, 4.0, 0.0]],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Clear color [r, g, b, a]
    pub clear_color: [f32; 4],
    pub blend: BlendMode,
    pub depth_stencil: DepthStencilMode,
    pub rasterizer: RasterizerMode,
    pub sampler: SamplerMode,
    /// Vertex shader blob (SPIR-V or WGSL); built-in shader when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex_shader: Option<PathBuf>,
    /// Pixel shader blob (SPIR-V or WGSL); built-in shader when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_shader: Option<PathBuf>,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.2, 0.2, 1.0],
            blend: BlendMode::Opaque,
            depth_stencil: DepthStencilMode::ReadWrite,
            rasterizer: RasterizerMode::CullAntiClockwise,
            sampler: SamplerMode::LinearWrap,
            vertex_shader: None,
            pixel_shader: None,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "Physics Example");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.style, WindowStyle::Normal);
        assert!(config.window.vsync);
        assert_eq!(config.physics.gravity, [0.0, -9.8, 0.0]);
        assert_eq!(config.rendering.clear_color, [0.2, 0.2, 0.2, 1.0]);
    }

    #[test]
    fn test_window_style_cycle() {
        assert_eq!(WindowStyle::Normal.next(), WindowStyle::Borderless);
        assert_eq!(WindowStyle::Borderless.next(), WindowStyle::Fullscreen);
        assert_eq!(WindowStyle::Fullscreen.next(), WindowStyle::Normal);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("gravity"));
        assert!(toml.contains("cull_anti_clockwise"));
        assert!(!toml.contains("vertex_shader"));
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string(
                r#"
                [window]
                title = "Custom"
                width = 1024
                height = 768
                style = "borderless"
                vsync = false

                [rendering]
                clear_color = [0.0, 0.0, 0.0, 1.0]
                blend = "alpha"
                depth_stencil = "read_only"
                rasterizer = "wireframe"
                sampler = "point_clamp"
                vertex_shader = "shaders/custom.spv"
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.window.style, WindowStyle::Borderless);
        assert_eq!(config.rendering.blend, BlendMode::Alpha);
        assert_eq!(config.rendering.rasterizer, RasterizerMode::Wireframe);
        assert_eq!(
            config.rendering.vertex_shader.as_deref(),
            Some(Path::new("shaders/custom.spv"))
        );
        assert!(config.rendering.pixel_shader.is_none());
        assert_eq!(config.camera.fov, 45.0);
        assert_eq!(config.scene.cubes.len(), 1);
    }

    #[test]
    fn test_single_key_fills_rest_of_section() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string(
                r#"
                [physics]
                max_frame_time = 0.05

                [rendering]
                rasterizer = "wireframe"
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.physics.max_frame_time, 0.05);
        assert_eq!(config.physics.gravity, [0.0, -9.8, 0.0]);
        assert_eq!(config.physics.reset_height, Some(-20.0));
        assert_eq!(config.rendering.rasterizer, RasterizerMode::Wireframe);
        assert_eq!(config.rendering.clear_color, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(config.rendering.blend, BlendMode::Opaque);
    }

    #[test]
    fn test_missing_config_dir_uses_defaults() {
        let config = AppConfig::load_from("no/such/config/dir").unwrap();
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn test_config_error_display() {
        let err = Figment::new()
            .merge(Toml::string("[window]\nwidth = \"wide\""))
            .extract::<AppConfig>()
            .map_err(ConfigError::from)
            .unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
