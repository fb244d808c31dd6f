//! Physics simulation system
//!
//! Owns the frame clock and the rigid-body simulation. Each frame the clock
//! is ticked, the delta is capped, bodies are stepped, and their model
//! transforms are handed to the renderer.

use std::time::Duration;
use phys3d_math::{Mat4, Vec3};
use phys3d_physics::{update_transform, BodyKey, Clock, RigidBody, Simulation, SimulationConfig};
use crate::config::PhysicsConfig;

/// Drives the simulation from the frame clock
pub struct SimulationSystem {
    clock: Clock,
    simulation: Simulation,
    max_frame_time: f32,
}

impl SimulationSystem {
    /// Create a simulation system from config
    pub fn new(config: &PhysicsConfig) -> Self {
        let simulation = Simulation::with_config(SimulationConfig {
            gravity: Vec3::from_array(config.gravity),
            reset_height: config.reset_height,
        });

        Self {
            clock: Clock::new(),
            simulation,
            max_frame_time: config.max_frame_time,
        }
    }

    /// Add a body to the simulation
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.simulation.add_body(body)
    }

    /// Run one frame measured by the wall clock
    ///
    /// Returns the step length in seconds, after capping.
    pub fn update(&mut self) -> f32 {
        self.clock.tick();
        self.step_current()
    }

    /// Run one frame of a fixed length
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.clock.tick_by(delta);
        self.step_current()
    }

    fn step_current(&mut self) -> f32 {
        // A long stall (first frame, window drag) would launch bodies far away
        let dt = (self.clock.delta_secs() as f32).min(self.max_frame_time);
        self.simulation.step(dt);
        dt
    }

    /// Model transform of every body
    pub fn transforms(&self) -> impl Iterator<Item = (BodyKey, Mat4)> + '_ {
        self.simulation
            .bodies()
            .map(|(key, body)| (key, update_transform(body)))
    }

    /// Model transform of one body
    pub fn transform(&self, key: BodyKey) -> Option<Mat4> {
        self.simulation.body(key).map(update_transform)
    }

    /// Put every body back at its spawn point and restart the clock
    pub fn reset(&mut self) {
        self.simulation.reset();
        self.clock.reset();
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}
