//! Raw input handling
//!
//! This crate decodes raw keyboard and mouse records into a button/axis
//! abstraction, and provides a camera controller on top of it.
//!
//! ## Key Components
//!
//! - [`RawInput`] - keyboard, mouse and HID records as the platform reports them
//! - [`RawInputQueue`] - per-frame buffer of pending records
//! - [`Input`] - decoded button states and axis values
//! - [`platform`] - encodes winit events as raw records
//! - [`CameraController`] - WASD + mouse-look driven by [`Input`]

mod button;
mod camera_controller;
mod input;
pub mod platform;
mod raw;

pub use button::{ButtonState, InputAxis, InputButton, InputDevice};
pub use camera_controller::{CameraControl, CameraController};
pub use input::{translate_key, translate_mouse_button, Input};
pub use raw::{
    KeyFlags, MouseButtonFlags, MouseMoveFlags, RawHid, RawInput, RawInputQueue, RawKeyboard,
    RawMouse, RAW_INPUT_BUFFER_SIZE, RAW_INPUT_QUEUE_CAPACITY, WHEEL_DELTA,
};
