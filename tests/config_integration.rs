//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use phys3d::config::{AppConfig, WindowStyle};
use phys3d::scene::SceneBuilder;
use phys3d::systems::renderer_settings;
use phys3d_render::pipeline::{DepthStencilMode, RasterizerMode};
use serial_test::serial;

fn temp_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("phys3d_config_{}", name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("P3D_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("P3D_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("P3D_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let from_file = AppConfig::load_from(cwd.join("config")).unwrap();
    let builtin = AppConfig::default();
    assert_eq!(from_file.window.title, builtin.window.title);
    assert_eq!(from_file.window.width, builtin.window.width);
    assert_eq!(from_file.physics.gravity, builtin.physics.gravity);
    assert_eq!(from_file.scene.cubes, builtin.scene.cubes);
    assert_eq!(from_file.rendering.clear_color, builtin.rendering.clear_color);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = temp_config_dir("user_override");
    fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"Default\"\nwidth = 800\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[window]\ntitle = \"User\"\nstyle = \"fullscreen\"\n\n[rendering]\nrasterizer = \"wireframe\"\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "User");
    assert_eq!(config.window.width, 800);
    assert_eq!(config.window.style, WindowStyle::Fullscreen);
    assert_eq!(config.rendering.rasterizer, RasterizerMode::Wireframe);

    fs::remove_dir_all(&dir).ok();
}

#[test]
#[serial]
fn test_nested_env_override() {
    let dir = temp_config_dir("nested_env");
    std::env::set_var("P3D_RENDERING__DEPTH_STENCIL", "none");
    std::env::set_var("P3D_PHYSICS__MAX_FRAME_TIME", "0.05");

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.rendering.depth_stencil, DepthStencilMode::None);
    assert_eq!(config.physics.max_frame_time, 0.05);

    std::env::remove_var("P3D_RENDERING__DEPTH_STENCIL");
    std::env::remove_var("P3D_PHYSICS__MAX_FRAME_TIME");
    fs::remove_dir_all(&dir).ok();
}

#[test]
#[serial]
fn test_invalid_value_is_error() {
    let dir = temp_config_dir("invalid");
    fs::write(dir.join("default.toml"), "[window]\nstyle = \"sideways\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    assert!(result.is_err());

    fs::remove_dir_all(&dir).ok();
}

#[test]
#[serial]
fn test_loaded_config_drives_scene_and_pipeline() {
    let config = AppConfig::load_from(temp_config_dir("empty")).unwrap();

    let scene = SceneBuilder::from_config(&config.scene).build();
    assert_eq!(scene.body_count(), config.scene.cubes.len());

    let settings = renderer_settings(&config.rendering, config.window.vsync).unwrap();
    assert_eq!(settings.clear_color, config.rendering.clear_color);
    assert_eq!(settings.pipeline.rasterizer, config.rendering.rasterizer);
}
