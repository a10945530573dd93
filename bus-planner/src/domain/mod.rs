//! Domain types for the itinerary planner.
//!
//! This module contains the core domain model types: stops, routes, legs
//! and their scheduled occurrences. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod error;
mod leg;
mod leg_time;
mod route;
mod sequence;
mod stop;
mod time;

pub use error::DomainError;
pub use leg::Leg;
pub use leg_time::{LegTime, LegTimeKey};
pub use route::{Route, RouteId, RouteStop};
pub use sequence::Sequence;
pub use stop::{InvalidStopSymbol, Point, Stop, StopSymbol};
pub use time::{SECONDS_PER_DAY, ScheduleTime, TimeError};
