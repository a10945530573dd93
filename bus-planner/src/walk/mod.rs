//! Walking between stops.
//!
//! Consecutive legs of a trip rarely share a stop exactly: the rider gets
//! off one vehicle and walks to the boarding stop of the next. This module
//! provides the distance seam used to measure those walks and the
//! conversion from distance to walking time.

use std::collections::HashMap;

use chrono::Duration;
use tracing::trace;

use crate::domain::{Stop, StopSymbol};

/// Distance between two stops, in metres.
pub trait Metric {
    fn distance(&self, from: &Stop, to: &Stop) -> f64;
}

/// A table of known walking distances between stop pairs.
///
/// Distances are symmetric: if you can walk from A to B, you can walk from
/// B to A the same distance. A stop is at distance zero from itself, and
/// pairs missing from the table are treated as co-located.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    /// Map from (from, to) to distance in metres.
    /// Stored in both directions for O(1) lookup.
    distances: HashMap<(StopSymbol, StopSymbol), f64>,
}

impl DistanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a walking distance between two stops.
    ///
    /// The distance is stored symmetrically (both A→B and B→A).
    pub fn add(&mut self, from: StopSymbol, to: StopSymbol, metres: f64) {
        self.distances.insert((from.clone(), to.clone()), metres);
        self.distances.insert((to, from), metres);
    }

    /// Get the walking distance between two stops, if known.
    pub fn get(&self, from: &StopSymbol, to: &StopSymbol) -> Option<f64> {
        if from == to {
            return Some(0.0);
        }
        self.distances.get(&(from.clone(), to.clone())).copied()
    }

    /// Get all stops with a known distance from a given stop.
    pub fn neighbours(&self, from: &StopSymbol) -> Vec<(StopSymbol, f64)> {
        self.distances
            .iter()
            .filter(|((f, _), _)| f == from)
            .map(|((_, t), metres)| (t.clone(), *metres))
            .collect()
    }

    /// Returns the number of stop pairs (counting A→B and B→A as one).
    pub fn len(&self) -> usize {
        self.distances.len() / 2
    }

    /// Returns true if there are no distances.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Pairs missing from the table are taken as co-located: no walk.
impl Metric for DistanceTable {
    fn distance(&self, from: &Stop, to: &Stop) -> f64 {
        self.get(&from.symbol, &to.symbol).unwrap_or_else(|| {
            trace!(from = %from.symbol, to = %to.symbol, "No walking distance, assuming 0m");
            0.0
        })
    }
}

/// Builder for creating distance tables from string symbols.
#[derive(Debug, Default)]
pub struct DistanceTableBuilder {
    inner: DistanceTable,
}

impl DistanceTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a distance; pairs with invalid symbols are skipped.
    pub fn add(mut self, from: &str, to: &str, metres: f64) -> Self {
        if let (Ok(from), Ok(to)) = (StopSymbol::parse(from), StopSymbol::parse(to)) {
            self.inner.add(from, to, metres);
        }
        self
    }

    /// Build the distance table.
    pub fn build(self) -> DistanceTable {
        self.inner
    }
}

/// Walking speed, converting distances into walking times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSpeed {
    metres_per_second: f64,
}

impl WalkSpeed {
    /// Walking speed in kilometres per hour.
    pub fn from_kmh(kmh: f64) -> Self {
        Self {
            metres_per_second: kmh * 1000.0 / 3600.0,
        }
    }

    pub fn metres_per_second(&self) -> f64 {
        self.metres_per_second
    }

    /// Time needed to walk `metres`, truncated to whole seconds.
    ///
    /// Non-positive distances and non-positive speeds give zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_planner::walk::WalkSpeed;
    /// use chrono::Duration;
    ///
    /// let speed = WalkSpeed::from_kmh(3.6); // 1 m/s
    /// assert_eq!(speed.duration(90.7), Duration::seconds(90));
    /// ```
    pub fn duration(&self, metres: f64) -> Duration {
        if metres <= 0.0 || self.metres_per_second <= 0.0 || !metres.is_finite() {
            return Duration::zero();
        }
        Duration::seconds((metres / self.metres_per_second) as i64)
    }
}

impl Default for WalkSpeed {
    fn default() -> Self {
        Self::from_kmh(5.0)
    }
}
