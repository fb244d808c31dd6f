//! Fly camera driven by decoded input
//!
//! Controls:
//! - W/S: Forward/backward
//! - A/D: Strafe left/right
//! - E/Q: Up/down
//! - Right mouse button + drag: Look around

use phys3d_math::Vec3;

use crate::button::{ButtonState, InputAxis, InputButton};
use crate::input::Input;

/// Camera controller reading an [`Input`] each frame
pub struct CameraController {
    // Input smoothing state
    smooth_yaw: f32,
    smooth_pitch: f32,

    // Configuration
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub smoothing_half_life: f32, // Exponential smoothing half-life in seconds
    pub smoothing_enabled: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            smooth_yaw: 0.0,
            smooth_pitch: 0.0,

            move_speed: 3.0,
            mouse_sensitivity: 0.002,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }

    /// Movement input as (forward, right, up), each in -1..=1
    pub fn movement_input(&self, input: &Input) -> (f32, f32, f32) {
        let forward = input.which_button(InputButton::W, InputButton::S, ButtonState::Down);
        let right = input.which_button(InputButton::D, InputButton::A, ButtonState::Down);
        let up = input.which_button(InputButton::E, InputButton::Q, ButtonState::Down);
        (forward as f32, right as f32, up as f32)
    }

    /// Whether mouse look is active this frame
    pub fn is_looking(&self, input: &Input) -> bool {
        input.is_down(InputButton::RIGHT_BUTTON)
    }

    /// Apply this frame's input to the camera
    ///
    /// Returns the camera position after the update.
    pub fn update<C: CameraControl>(&mut self, input: &Input, camera: &mut C, dt: f32) -> Vec3 {
        let (forward, right, up) = self.movement_input(input);
        camera.move_local(forward * self.move_speed * dt, right * self.move_speed * dt);
        camera.move_y(up * self.move_speed * dt);

        let (yaw_input, pitch_input) = if self.is_looking(input) {
            (
                input.axis_value(InputAxis::X) as f32,
                input.axis_value(InputAxis::Y) as f32,
            )
        } else {
            (0.0, 0.0)
        };

        let (yaw_input, pitch_input) = if self.smoothing_enabled && dt > 0.0 {
            // factor = 2^(-dt / half_life), so smaller half_life = faster response
            let smooth_factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_yaw = self.smooth_yaw * smooth_factor + yaw_input * (1.0 - smooth_factor);
            self.smooth_pitch = self.smooth_pitch * smooth_factor + pitch_input * (1.0 - smooth_factor);
            (self.smooth_yaw, self.smooth_pitch)
        } else {
            (yaw_input, pitch_input)
        };

        // Mouse down (positive y) looks down
        if yaw_input != 0.0 || pitch_input != 0.0 {
            camera.rotate(
                yaw_input * self.mouse_sensitivity,
                -pitch_input * self.mouse_sensitivity,
            );
        }

        camera.position()
    }

    /// Toggle input smoothing on/off
    pub fn toggle_smoothing(&mut self) -> bool {
        self.smoothing_enabled = !self.smoothing_enabled;
        self.smooth_yaw = 0.0;
        self.smooth_pitch = 0.0;
        self.smoothing_enabled
    }

    /// Builder: set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set smoothing half-life (lower = more responsive)
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Move along the view direction projected onto the ground plane, and sideways
    fn move_local(&mut self, forward: f32, right: f32);
    fn move_y(&mut self, delta: f32);
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
    fn position(&self) -> Vec3;
}
