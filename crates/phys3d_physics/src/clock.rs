//! Frame clock
//!
//! Tracks the time between consecutive frames and the total time since the
//! clock was created or last reset.

use std::time::{Duration, Instant};

/// Frame clock driving the simulation
#[derive(Clone, Debug)]
pub struct Clock {
    previous: Instant,
    delta: Duration,
    total: Duration,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a clock whose reference point is now
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            delta: Duration::ZERO,
            total: Duration::ZERO,
        }
    }

    /// Measure the time since the previous tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.previous;
        self.total += self.delta;
        self.previous = now;
    }

    /// Advance the clock by a fixed amount instead of measuring wall time
    pub fn tick_by(&mut self, delta: Duration) {
        self.delta = delta;
        self.total += delta;
        self.previous += delta;
    }

    /// Restart the reference point and zero the accumulated times
    pub fn reset(&mut self) {
        self.previous = Instant::now();
        self.delta = Duration::ZERO;
        self.total = Duration::ZERO;
    }

    /// Time between the last two ticks
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total time accumulated over all ticks
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Delta time in seconds
    pub fn delta_secs(&self) -> f64 {
        self.delta.as_secs_f64()
    }

    /// Total time in seconds
    pub fn total_secs(&self) -> f64 {
        self.total.as_secs_f64()
    }
}
