//! Route data sources.
//!
//! Loading timetables from an agency's own storage is the caller's job;
//! this module offers an in-memory `RouteData` that can be filled
//! programmatically or from a JSON route file.

mod memory;
mod types;

pub use memory::MemoryRouteData;
pub use types::{DistanceRecord, RouteFile, RouteRecord, RouteStopRecord, StopRecord};
