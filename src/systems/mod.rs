//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod render;
mod simulation;
mod window;

pub use render::{camera_from_config, renderer_settings, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{WindowError, WindowSystem};
