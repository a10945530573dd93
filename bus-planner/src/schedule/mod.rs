//! Route timetables and day selection.
//!
//! A route's `Schedule` holds one `DaySchedule` per day type (weekdays,
//! Saturdays, holidays, ...). Which day type applies on a given date is
//! calendar logic owned by the caller; the planner only sees it through
//! the `ScheduleSelector` seam.

use std::fmt;

use crate::domain::{RouteId, ScheduleTime};

/// Name of a kind of service day, e.g. "weekday" or "sunday".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayType(String);

impl DayType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Departures of a route from its first stop for one day type.
///
/// # Invariants
///
/// - `times` is sorted ascending (duplicates allowed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    day_type: DayType,
    times: Vec<ScheduleTime>,
}

impl DaySchedule {
    /// Create a day schedule; times are sorted if they are not already.
    pub fn new(day_type: DayType, mut times: Vec<ScheduleTime>) -> Self {
        times.sort_unstable();
        Self { day_type, times }
    }

    pub fn day_type(&self) -> &DayType {
        &self.day_type
    }

    /// Returns the departure times in ascending order.
    pub fn times(&self) -> &[ScheduleTime] {
        &self.times
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// All timetables of one route.
#[derive(Debug, Clone)]
pub struct Schedule {
    route_id: RouteId,
    days: Vec<DaySchedule>,
}

impl Schedule {
    pub fn new(route_id: RouteId, days: Vec<DaySchedule>) -> Self {
        Self { route_id, days }
    }

    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// Returns the timetable for a day type, if the route runs on it.
    pub fn day(&self, day_type: &DayType) -> Option<&DaySchedule> {
        self.days.iter().find(|d| &d.day_type == day_type)
    }
}

/// Picks the timetable that applies to the travel day.
///
/// Returning `None` means the route does not run that day.
pub trait ScheduleSelector {
    fn select<'s>(&self, schedule: &'s Schedule) -> Option<&'s DaySchedule>;
}

/// Selects timetables by a fixed day type.
#[derive(Debug, Clone)]
pub struct DayTypeSelector {
    day_type: DayType,
}

impl DayTypeSelector {
    pub fn new(day_type: DayType) -> Self {
        Self { day_type }
    }
}

impl ScheduleSelector for DayTypeSelector {
    fn select<'s>(&self, schedule: &'s Schedule) -> Option<&'s DaySchedule> {
        schedule.day(&self.day_type)
    }
}
