//! Fundamental lane and timing types.

use serde::{Deserialize, Serialize};

/// A position on the lane. Only `x` changes during play; `y` is fixed
/// to the lane (or the base row) at creation.
pub type LanePosition = glam::DVec2;

/// Horizontal distance between two lane positions.
pub fn lane_distance(a: &LanePosition, b: &LanePosition) -> f64 {
    (a.x - b.x).abs()
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Completed update ticks (frame counter).
    pub frame: u64,
    /// Simulated time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        self.frame += 1;
        self.elapsed_ms += dt_ms;
    }

    /// Simulated time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }
}
