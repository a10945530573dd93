//! Bus itinerary planner.
//!
//! A library that answers: "I want to ride these legs in order today -
//! which departures connect, and which is the next one I can catch?"

pub mod data;
pub mod domain;
pub mod planner;
pub mod schedule;
pub mod walk;
