//! Rigid body simulation for phys3d
//!
//! This crate provides:
//! - A frame clock measuring delta and total time
//! - Rigid bodies with an axis-aligned bounding box
//! - A gravity-only simulation using explicit Euler integration

pub mod body;
pub mod clock;
pub mod simulation;

// Re-export commonly used types
pub use body::{BoundingBox, RigidBody};
pub use clock::Clock;
pub use simulation::{update_transform, BodyKey, Simulation, SimulationConfig, DEFAULT_GRAVITY};
