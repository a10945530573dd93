//! One position of a trip sequence.
//!
//! A `Level` gathers every scheduled occurrence of the legs interchangeable
//! with the sequence's leg at that position, sorted by departure, so the
//! chaining step can find the first usable departure with a binary search.

use chrono::Duration;
use tracing::debug;

use crate::domain::{Leg, LegTime, ScheduleTime};
use crate::schedule::ScheduleSelector;

use super::equivalence::equivalent_legs;
use super::provider::{DataError, RouteData};

/// Feasible departures at one transfer point.
///
/// # Invariants
///
/// - `times` is non-decreasing and `times[i] == leg_times[i].time1()`
#[derive(Debug, Clone)]
pub struct Level {
    leg: Leg,
    equivalent_legs: Option<Vec<Leg>>,
    leg_times: Vec<LegTime>,
    times: Vec<ScheduleTime>,
    walk_time: Duration,
}

impl Level {
    /// Create an uncomputed level with no walk time.
    pub fn new(leg: Leg) -> Self {
        Self {
            leg,
            equivalent_legs: None,
            leg_times: Vec::new(),
            times: Vec::new(),
            walk_time: Duration::zero(),
        }
    }

    /// Set the time needed to reach this level's boarding stop from the
    /// previous level's alighting stop.
    pub fn set_walk_time(&mut self, walk_time: Duration) {
        self.walk_time = walk_time;
    }

    pub fn walk_time(&self) -> Duration {
        self.walk_time
    }

    pub fn leg(&self) -> &Leg {
        &self.leg
    }

    /// The resolved equivalence class, once computed.
    pub fn equivalent_legs(&self) -> Option<&[Leg]> {
        self.equivalent_legs.as_deref()
    }

    /// Occurrences sorted by departure; empty until computed.
    pub fn leg_times(&self) -> &[LegTime] {
        &self.leg_times
    }

    /// Departure times, index-aligned with `leg_times`.
    pub fn times(&self) -> &[ScheduleTime] {
        &self.times
    }

    /// Resolve the equivalence class (if not already resolved), fetch each
    /// equivalent leg's timetable for the travel day and materialise one
    /// `LegTime` per departure.
    ///
    /// Routes with no timetable for the day contribute nothing.
    pub fn compute<S, D>(&mut self, selector: &S, data: &D) -> Result<(), DataError>
    where
        S: ScheduleSelector + ?Sized,
        D: RouteData + ?Sized,
    {
        if self.equivalent_legs.is_none() {
            self.equivalent_legs = Some(equivalent_legs(data, &self.leg)?);
        }
        let legs = self.equivalent_legs.as_deref().unwrap_or_default();

        let mut leg_times = Vec::new();
        for leg in legs {
            let schedule = data.schedule(leg.route_id())?;
            let Some(day) = selector.select(&schedule) else {
                debug!(route = %leg.route_id(), "No timetable for travel day");
                continue;
            };
            for &departure in day.times() {
                leg_times.push(LegTime::new(leg.clone(), departure)?);
            }
        }

        // Stable: equal departures keep route order.
        leg_times.sort_by_key(|lt| lt.time1());
        self.times = leg_times.iter().map(|lt| lt.time1()).collect();
        self.leg_times = leg_times;

        debug!(
            leg = %self.leg,
            routes = legs.len(),
            departures = self.times.len(),
            "Computed level"
        );
        Ok(())
    }

    /// Index of the first departure at or after `time`, or `None` when
    /// there is no more service.
    ///
    /// Among equal departures the lowest index wins.
    pub fn find_time_index(&self, time: ScheduleTime) -> Option<usize> {
        let pos = self.times.partition_point(|&t| t < time);
        (pos < self.times.len()).then_some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, RouteId, RouteStop, Stop, StopSymbol};

    fn t(s: &str) -> ScheduleTime {
        ScheduleTime::parse_hhmm(s).unwrap()
    }

    fn leg() -> Leg {
        let stop = |s: &str, i: usize| {
            RouteStop::new(
                Stop::new(StopSymbol::parse(s).unwrap(), s, Point::default()),
                i,
                Duration::minutes(i as i64 * 5),
            )
        };
        Leg::new(RouteId::new("040", "1"), stop("A", 0), Some(stop("B", 1))).unwrap()
    }

    fn level_with(departures: &[&str]) -> Level {
        let mut level = Level::new(leg());
        level.leg_times = departures
            .iter()
            .map(|d| LegTime::new(leg(), t(d)).unwrap())
            .collect();
        level.times = level.leg_times.iter().map(|lt| lt.time1()).collect();
        level
    }

    #[test]
    fn new_level_is_empty() {
        let level = Level::new(leg());
        assert!(level.leg_times().is_empty());
        assert!(level.equivalent_legs().is_none());
        assert_eq!(level.walk_time(), Duration::zero());
        assert_eq!(level.find_time_index(t("00:00")), None);
    }

    #[test]
    fn find_exact_and_between() {
        let level = level_with(&["08:00", "09:00", "10:00"]);

        assert_eq!(level.find_time_index(t("07:00")), Some(0));
        assert_eq!(level.find_time_index(t("08:00")), Some(0));
        assert_eq!(level.find_time_index(t("08:01")), Some(1));
        assert_eq!(level.find_time_index(t("10:00")), Some(2));
        assert_eq!(level.find_time_index(t("10:01")), None);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let level = level_with(&["08:00", "09:00", "09:00", "09:00", "10:00"]);
        assert_eq!(level.find_time_index(t("09:00")), Some(1));
        assert_eq!(level.find_time_index(t("08:30")), Some(1));
    }

    #[test]
    fn walk_time_setter() {
        let mut level = Level::new(leg());
        level.set_walk_time(Duration::seconds(90));
        assert_eq!(level.walk_time(), Duration::seconds(90));
    }
}
