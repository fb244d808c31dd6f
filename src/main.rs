//! phys3d - falling cubes demo
//!
//! Opens a window, drops cubes onto a floor under gravity and lets the user
//! fly around them.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use phys3d::config::AppConfig;
use phys3d::input::{InputAction, InputMapper};
use phys3d::scene::{Scene, SceneBuilder};
use phys3d::systems::{camera_from_config, RenderSystem, SimulationSystem, WindowSystem};
use phys3d_input::{platform, CameraController, Input, RawInputQueue};
use phys3d_physics::BodyKey;
use phys3d_render::{Camera, DrawItemKey, RenderError};

/// Seconds between frame rate samples shown in the title
const TITLE_INTERVAL: f32 = 0.5;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    scene: Scene,
    /// Body driving each scene object, by object index
    body_keys: Vec<Option<BodyKey>>,
    /// Draw items that follow a body
    bindings: Vec<(BodyKey, DrawItemKey)>,
    raw_input: RawInputQueue,
    input: Input,
    mapper: InputMapper,
    camera: Camera,
    controller: CameraController,
    focused: bool,
    frame_count: u32,
    title_timer: f32,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let scene = SceneBuilder::from_config(&config.scene).build();

        let mut simulation = SimulationSystem::new(&config.physics);
        let body_keys = scene
            .objects
            .iter()
            .map(|object| object.body.clone().map(|body| simulation.add_body(body)))
            .collect();

        log::info!(
            "Built scene with {} objects ({} bodies)",
            scene.object_count(),
            scene.body_count()
        );

        // Configure controller from config
        let controller = CameraController::new()
            .with_move_speed(config.input.move_speed)
            .with_mouse_sensitivity(config.input.mouse_sensitivity)
            .with_smoothing_half_life(config.input.smoothing_half_life)
            .with_smoothing(config.input.smoothing_enabled);

        let camera = camera_from_config(&config.camera);

        Self {
            config,
            window: None,
            render: None,
            simulation,
            scene,
            body_keys,
            bindings: Vec::new(),
            raw_input: RawInputQueue::new(),
            input: Input::default(),
            mapper: InputMapper::new(),
            camera,
            controller,
            focused: true,
            frame_count: 0,
            title_timer: 0.0,
        }
    }

    /// Create the window and renderer, then upload the scene
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let window = WindowSystem::create(event_loop, &self.config.window)?;
        let mut render = RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
        )?;

        self.bindings.clear();
        for (object, body_key) in self.scene.objects.iter().zip(&self.body_keys) {
            let item = render.add_mesh(&object.mesh, object.transform)?;
            if let Some(body_key) = body_key {
                self.bindings.push((*body_key, item));
            }
        }

        self.window = Some(window);
        self.render = Some(render);
        Ok(())
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetSimulation => {
                self.simulation.reset();
                log::info!("Simulation reset");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &mut self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::CycleWindowStyle => {
                if let Some(window) = &mut self.window {
                    window.change_style(window.style().next());
                }
            }
            InputAction::ToggleVsync => {
                if let Some(render) = &mut self.render {
                    let vsync = !render.vsync();
                    render.set_vsync(vsync);
                    log::info!("VSync: {}", if vsync { "ON" } else { "OFF" });
                }
            }
            InputAction::ToggleSmoothing => {
                let enabled = self.controller.toggle_smoothing();
                log::info!("Input smoothing: {}", if enabled { "ON" } else { "OFF" });
            }
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        // 1. Decode this frame's raw input
        self.input.process_messages(&mut self.raw_input);
        for action in self.mapper.map(&self.input) {
            self.handle_action(action, event_loop);
        }

        // 2. Step the simulation from the frame clock
        let dt = self.simulation.update();

        // 3. Fly camera
        self.controller.update(&self.input, &mut self.camera, dt);

        // 4. Push body transforms and draw
        if let Some(render) = &mut self.render {
            let transforms = self
                .bindings
                .iter()
                .filter_map(|(body, item)| self.simulation.transform(*body).map(|t| (*item, t)));
            if let Err(e) = render.sync_transforms(transforms) {
                log::warn!("Failed to update transforms: {}", e);
            }

            match render.render_frame(&self.camera) {
                Ok(()) => {}
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("Render error: {}", e),
            }
        }

        // 5. Title with position and frame rate
        self.frame_count += 1;
        self.title_timer += self.simulation.clock().delta_secs() as f32;
        if self.title_timer >= TITLE_INTERVAL {
            let fps = self.frame_count as f32 / self.title_timer;
            if let Some(window) = &self.window {
                window.update_title(self.camera.position, fps);
            }
            self.frame_count = 0;
            self.title_timer = 0.0;
        }

        // Request next frame
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Failed to initialise graphics: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Release records will not arrive while unfocused
                    self.raw_input.clear();
                    self.input.clear();
                    self.mapper.reset();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(record) = platform::keyboard_record(key, event.state) {
                        self.raw_input.push(record);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(record) = platform::mouse_button_record(button, state) {
                    self.raw_input.push(record);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.raw_input.extend(platform::mouse_wheel_record(delta));
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.focused {
                self.raw_input.push(platform::mouse_motion_record(delta));
            }
        }
    }
}

fn main() {
    // Load configuration before logging so its level can seed the filter
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting phys3d");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
