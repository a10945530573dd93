//! Route file DTOs.
//!
//! These types map directly to the JSON route file format. Values are
//! validated when converted into domain types, not here.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level route file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFile {
    /// Every stop referenced by a route.
    #[serde(default)]
    pub stops: Vec<StopRecord>,

    /// Routes with their stop lists and timetables.
    #[serde(default)]
    pub routes: Vec<RouteRecord>,

    /// Known walking distances between stops. Stop pairs not listed here
    /// need no walk between them, whatever their coordinates.
    #[serde(default)]
    pub distances: Vec<DistanceRecord>,
}

/// A stop and its location.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRecord {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub lat: f64,

    #[serde(default)]
    pub lon: f64,
}

/// One direction of a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRecord {
    /// Route name, e.g. "040".
    pub name: String,

    /// Direction qualifier, e.g. "1"; may be empty.
    #[serde(default)]
    pub direction: String,

    /// Label shown to riders; defaults to the name.
    pub label: Option<String>,

    #[serde(default)]
    pub title: String,

    /// Stops in visiting order.
    pub stops: Vec<RouteStopRecord>,

    /// Departures from the first stop ("HH:MM"), keyed by day type.
    #[serde(default)]
    pub schedules: BTreeMap<String, Vec<String>>,
}

/// A stop visit on a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStopRecord {
    pub symbol: String,

    /// Travel time from the first stop, "HH:MM" or "HH:MM:SS".
    pub offset: String,
}

/// A walking distance between two stops.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub metres: f64,
}
