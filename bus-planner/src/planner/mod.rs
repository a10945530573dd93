//! Itinerary matching.
//!
//! This module implements the core planning algorithm that answers:
//! "I want to ride these legs in order today - which concrete departures
//! connect, and which is the next one I can still catch?"
//!
//! Each leg becomes a `Level` holding the sorted departures of every route
//! serving the same stop pair; levels are then chained forward in time,
//! allowing for the walk between consecutive legs.

mod config;
mod equivalence;
mod leg_group;
mod level;
mod provider;
mod sequence_schedule;

pub use config::PlannerConfig;
pub use equivalence::equivalent_legs;
pub use leg_group::LegGroup;
pub use level::Level;
pub use provider::{DataError, RouteData};
pub use sequence_schedule::{SequenceInstance, SequenceSchedule};
