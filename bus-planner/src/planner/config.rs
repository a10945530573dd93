//! Planner configuration.

use chrono::Duration;

use crate::walk::WalkSpeed;

/// Configuration parameters for sequence scheduling.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Walking speed between consecutive legs (km/h).
    pub walk_speed_kmh: f64,

    /// Minimum transfer time added to every walk between legs (seconds).
    /// Zero means the walk alone decides the connection.
    pub min_transfer_secs: i64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(walk_speed_kmh: f64, min_transfer_secs: i64) -> Self {
        Self {
            walk_speed_kmh,
            min_transfer_secs,
        }
    }

    /// Returns the walking speed.
    pub fn walk_speed(&self) -> WalkSpeed {
        WalkSpeed::from_kmh(self.walk_speed_kmh)
    }

    /// Returns the minimum transfer time as a Duration.
    pub fn min_transfer(&self) -> Duration {
        Duration::seconds(self.min_transfer_secs)
    }

    /// Time needed to get from one leg to the next, `metres` apart.
    pub fn transfer_time(&self, metres: f64) -> Duration {
        self.walk_speed().duration(metres) + self.min_transfer()
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            walk_speed_kmh: 5.0,
            min_transfer_secs: 0,
        }
    }
}
