//! Window management system
//!
//! Handles window creation, style changes (normal, borderless, fullscreen),
//! client-area resizing and title updates.

use std::sync::Arc;
use phys3d_math::Vec3;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::{WindowConfig, WindowStyle};

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    style: WindowStyle,
    /// Style to return to when leaving fullscreen
    windowed_style: WindowStyle,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        if config.width == 0 || config.height == 0 {
            return Err(WindowError::InvalidSize(config.width, config.height));
        }

        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false)
            .with_visible(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        let mut system = Self {
            window,
            style: WindowStyle::Normal,
            windowed_style: WindowStyle::Normal,
            base_title: config.title.clone(),
        };
        system.change_style(config.style);
        system.window.set_visible(true);
        system.window.focus_window();

        log::info!(
            "Created {}x{} window '{}' ({:?})",
            config.width,
            config.height,
            config.title,
            config.style
        );

        Ok(system)
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    /// Switch the window style, keeping the client area size
    pub fn change_style(&mut self, style: WindowStyle) {
        let client_size = self.window.inner_size();

        match style {
            WindowStyle::Normal => {
                self.window.set_fullscreen(None);
                self.window.set_decorations(true);
            }
            WindowStyle::Borderless => {
                self.window.set_fullscreen(None);
                self.window.set_decorations(false);
            }
            WindowStyle::Fullscreen => {
                self.window.set_decorations(false);
                let monitor = self.window.current_monitor();
                self.window.set_fullscreen(Some(Fullscreen::Borderless(monitor)));
            }
        }

        if style != WindowStyle::Fullscreen {
            let _ = self.window.request_inner_size(client_size);
            self.windowed_style = style;
            self.center();
        }

        log::debug!("Window style {:?} -> {:?}", self.style, style);
        self.style = style;
    }

    /// Toggle between fullscreen and the last windowed style
    pub fn toggle_fullscreen(&mut self) {
        let next = if self.style == WindowStyle::Fullscreen {
            self.windowed_style
        } else {
            WindowStyle::Fullscreen
        };
        self.change_style(next);
    }

    /// Resize the client area and re-center the window
    pub fn change_size(&self, width: u32, height: u32) {
        let _ = self.window.request_inner_size(PhysicalSize::new(width, height));
        self.center();
    }

    /// Center the window on its monitor
    pub fn center(&self) {
        let Some(monitor) = self.window.current_monitor() else {
            return;
        };
        let position = centered_position(monitor.position(), monitor.size(), self.window.outer_size());
        self.window.set_outer_position(position);
    }

    /// Update window title with camera position and frame rate
    pub fn update_title(&self, camera_position: Vec3, fps: f32) {
        self.window.set_title(&format_title(&self.base_title, camera_position, fps));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_title(base: &str, pos: Vec3, fps: f32) -> String {
    format!(
        "{} - ({:.1}, {:.1}, {:.1}) {:.0} fps",
        base, pos.x, pos.y, pos.z, fps
    )
}

fn centered_position(
    monitor_position: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window_size: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let x = (monitor_size.width as i32 - window_size.width as i32) / 2;
    let y = (monitor_size.height as i32 - window_size.height as i32) / 2;
    PhysicalPosition::new(monitor_position.x + x.max(0), monitor_position.y + y.max(0))
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
    InvalidSize(u32, u32),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
            WindowError::InvalidSize(w, h) => write!(f, "Invalid window size {}x{}", w, h),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_formatting() {
        let title = format_title("Physics Example", Vec3::new(1.0, 2.3, -3.0), 59.7);
        assert_eq!(title, "Physics Example - (1.0, 2.3, -3.0) 60 fps");
    }

    #[test]
    fn test_centered_position() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(560, 240));
    }

    #[test]
    fn test_centered_position_second_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(1920, 0),
            PhysicalSize::new(1280, 1024),
            PhysicalSize::new(1280, 1024),
        );
        assert_eq!(pos, PhysicalPosition::new(1920, 0));
    }

    #[test]
    fn test_oversized_window_pinned_to_corner() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(800, 600),
            PhysicalSize::new(1024, 768),
        );
        assert_eq!(pos, PhysicalPosition::new(0, 0));
    }

    #[test]
    fn test_window_error_display() {
        assert_eq!(
            WindowError::InvalidSize(0, 600).to_string(),
            "Invalid window size 0x600"
        );
    }
}
