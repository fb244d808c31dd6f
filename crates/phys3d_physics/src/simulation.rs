//! Gravity-only rigid body simulation

use crate::body::RigidBody;
use crate::clock::Clock;
use phys3d_math::{mat4, Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key to a rigid body in the simulation
    pub struct BodyKey;
}

/// Standard gravity, pointing down the Y axis
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// Configuration for the simulation
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Gravity acceleration in units per second squared
    pub gravity: Vec3,
    /// Bodies falling below this height are restored to their spawn state
    pub reset_height: Option<f32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            reset_height: None,
        }
    }
}

struct TrackedBody {
    body: RigidBody,
    spawn: RigidBody,
}

/// The simulation containing all rigid bodies
pub struct Simulation {
    bodies: SlotMap<BodyKey, TrackedBody>,
    /// Simulation configuration
    pub config: SimulationConfig,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Create a simulation with default configuration
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Create a simulation with custom configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            config,
        }
    }

    /// Add a body and remember its current state as its spawn state
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        let spawn = body.clone();
        self.bodies.insert(TrackedBody { body, spawn })
    }

    /// Remove a body and return its current state
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        self.bodies.remove(key).map(|tracked| tracked.body)
    }

    /// Get a body by key
    pub fn body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key).map(|tracked| &tracked.body)
    }

    /// Get a mutable body by key
    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key).map(|tracked| &mut tracked.body)
    }

    /// Iterate over all bodies with their keys
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &RigidBody)> {
        self.bodies.iter().map(|(key, tracked)| (key, &tracked.body))
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance every body by the clock's delta time
    pub fn update(&mut self, clock: &Clock) {
        let dt = clock.delta_secs() as f32;
        self.step(dt);
    }

    /// Advance every body by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let gravity = self.config.gravity;

        for (_key, tracked) in &mut self.bodies {
            apply_gravity(&mut tracked.body, gravity, dt);
        }

        if let Some(floor) = self.config.reset_height {
            for (key, tracked) in &mut self.bodies {
                if tracked.body.position.y < floor {
                    log::debug!("Body {:?} fell below {}, respawning", key, floor);
                    tracked.body = tracked.spawn.clone();
                }
            }
        }
    }

    /// Restore every body to its spawn state
    pub fn reset(&mut self) {
        for (_key, tracked) in &mut self.bodies {
            tracked.body = tracked.spawn.clone();
        }
        log::info!("Simulation reset ({} bodies)", self.bodies.len());
    }
}

/// Explicit Euler step: velocity first, then position from the new velocity
fn apply_gravity(body: &mut RigidBody, gravity: Vec3, dt: f32) {
    body.velocity += gravity * dt;
    body.position += body.velocity * dt;
}

/// Model matrix for a body, in the layout the vertex shader reads
pub fn update_transform(body: &RigidBody) -> Mat4 {
    mat4::translation(body.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_single_step() {
        let mut sim = Simulation::new();
        let key = sim.add_body(RigidBody::new(Vec3::new(0.0, 4.0, 0.0)));

        sim.step(0.5);

        let body = sim.body(key).unwrap();
        // v = -9.8 * 0.5, p = 4 + v * 0.5
        assert!((body.velocity.y - (-4.9)).abs() < EPSILON);
        assert!((body.position.y - (4.0 - 2.45)).abs() < EPSILON);
        assert_eq!(body.position.x, 0.0);
        assert_eq!(body.position.z, 0.0);
    }

    #[test]
    fn test_update_uses_clock_delta() {
        let mut sim = Simulation::new();
        let key = sim.add_body(RigidBody::new(Vec3::ZERO));

        let mut clock = Clock::new();
        clock.tick_by(Duration::from_millis(100));
        sim.update(&clock);

        let body = sim.body(key).unwrap();
        assert!((body.velocity.y - (-0.98)).abs() < EPSILON);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut sim = Simulation::new();
        let start = RigidBody::new(Vec3::new(1.0, 2.0, 3.0)).with_velocity(Vec3::X);
        let key = sim.add_body(start.clone());

        sim.update(&Clock::new());

        assert_eq!(sim.body(key), Some(&start));
    }

    #[test]
    fn test_horizontal_velocity_preserved() {
        let mut sim = Simulation::new();
        let key = sim.add_body(RigidBody::new(Vec3::ZERO).with_velocity(Vec3::new(2.0, 0.0, -1.0)));

        sim.step(1.0);

        let body = sim.body(key).unwrap();
        assert_eq!(body.velocity.x, 2.0);
        assert_eq!(body.velocity.z, -1.0);
        assert_eq!(body.position.x, 2.0);
        assert_eq!(body.position.z, -1.0);
    }

    #[test]
    fn test_custom_gravity() {
        let mut sim = Simulation::with_config(SimulationConfig {
            gravity: Vec3::new(1.0, 0.0, 0.0),
            reset_height: None,
        });
        let key = sim.add_body(RigidBody::new(Vec3::ZERO));
        sim.step(1.0);
        assert_eq!(sim.body(key).unwrap().position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut sim = Simulation::new();
        let key = sim.add_body(RigidBody::new(Vec3::new(0.0, 4.0, 0.0)));

        for _ in 0..10 {
            sim.step(0.1);
        }
        assert!(sim.body(key).unwrap().position.y < 4.0);

        sim.reset();
        let body = sim.body(key).unwrap();
        assert_eq!(body.position, Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_reset_height_respawns() {
        let mut sim = Simulation::with_config(SimulationConfig {
            gravity: DEFAULT_GRAVITY,
            reset_height: Some(0.0),
        });
        let key = sim.add_body(RigidBody::new(Vec3::new(0.0, 0.1, 0.0)));

        sim.step(1.0);

        assert_eq!(sim.body(key).unwrap().position.y, 0.1);
    }

    #[test]
    fn test_remove_body() {
        let mut sim = Simulation::new();
        let key = sim.add_body(RigidBody::new(Vec3::ZERO));
        assert_eq!(sim.body_count(), 1);
        assert!(sim.remove_body(key).is_some());
        assert!(sim.body(key).is_none());
        assert_eq!(sim.body_count(), 0);
    }

    #[test]
    fn test_update_transform_is_translation() {
        let body = RigidBody::new(Vec3::new(1.0, 2.0, 3.0));
        let m = update_transform(&body);
        assert_eq!(m[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
