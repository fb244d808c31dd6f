//! phys3d application library
//!
//! Configuration, scene construction, input mapping and the per-frame
//! systems used by the `phys3d` binary.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
