//! Fly camera
//!
//! Yaw turns around the world Y axis, pitch tilts up and down. Yaw 0 looks
//! down -Z.

use phys3d_input::CameraControl;
use phys3d_math::{mat4, Mat4, Vec3};

/// Pitch stays just short of straight up/down
const PITCH_LIMIT: f32 = 1.5;

/// Camera with position, orientation angles and projection parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 10.0),
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 45.0f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }

    /// Mouse look
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move along the horizontal view direction and sideways
    pub fn move_local(&mut self, forward: f32, right: f32) {
        let (sin, cos) = self.yaw.sin_cos();
        let flat_forward = Vec3::new(sin, 0.0, -cos);
        self.position += flat_forward * forward + self.right() * right;
    }

    pub fn move_y(&mut self, delta: f32) {
        self.position.y += delta;
    }

    /// View direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, -cos_pitch * cos_yaw)
    }

    /// Horizontal right direction
    pub fn right(&self) -> Vec3 {
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(cos, 0.0, sin)
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_to(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov_y, aspect, self.near, self.far)
    }
}

impl CameraControl for Camera {
    fn move_local(&mut self, forward: f32, right: f32) {
        Camera::move_local(self, forward, right);
    }

    fn move_y(&mut self, delta: f32) {
        Camera::move_y(self, delta);
    }

    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        Camera::rotate(self, delta_yaw, delta_pitch);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
