//! 3D Mathematics Library
//!
//! This crate provides the vector and matrix types used by the phys3d demo.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transforms and projections

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;
