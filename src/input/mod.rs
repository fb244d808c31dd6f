//! Input handling module
//!
//! Provides input mapping from decoded button state to semantic actions.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
