//! Door-to-door schedules for a sequence of legs.
//!
//! Given an ordered sequence of legs, builds one `Level` per leg and chains
//! them forward from every departure of the first leg, honouring the walk
//! between consecutive legs. The result is the list of feasible itineraries
//! of the travel day, ordered by start time.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, trace};

use crate::domain::{LegTime, LegTimeKey, ScheduleTime, Sequence};
use crate::schedule::ScheduleSelector;

use super::config::PlannerConfig;
use super::level::Level;
use super::provider::{DataError, RouteData};

/// One concrete end-to-end itinerary: one occurrence per leg of the
/// sequence, index-aligned with it.
///
/// # Invariants
///
/// - Non-empty
/// - Each occurrence departs no earlier than the previous one arrives plus
///   the walk between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceInstance {
    leg_times: Vec<LegTime>,
}

impl SequenceInstance {
    fn new(leg_times: Vec<LegTime>) -> Self {
        debug_assert!(!leg_times.is_empty());
        Self { leg_times }
    }

    pub fn leg_times(&self) -> &[LegTime] {
        &self.leg_times
    }

    /// Departure of the first leg.
    pub fn start_time(&self) -> ScheduleTime {
        self.leg_times
            .first()
            .map(|lt| lt.time1())
            .unwrap_or_default()
    }

    /// Arrival of the last leg.
    pub fn end_time(&self) -> ScheduleTime {
        self.leg_times
            .last()
            .map(|lt| lt.time2())
            .unwrap_or_default()
    }

    pub fn duration(&self) -> Duration {
        self.end_time().signed_duration_since(self.start_time())
    }

    /// Ordering keys of the occurrences, by position in the sequence.
    pub fn keys(&self) -> impl Iterator<Item = LegTimeKey> + '_ {
        self.leg_times
            .iter()
            .enumerate()
            .map(|(level, lt)| lt.key(level))
    }
}

impl fmt::Display for SequenceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time(), self.end_time())?;
        for lt in &self.leg_times {
            write!(f, " | {} {}", lt.leg().route_id(), lt.time1())?;
        }
        Ok(())
    }
}

/// All feasible itineraries of a sequence for one travel day.
///
/// Built once from already-loaded data and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SequenceSchedule {
    levels: Vec<Level>,
    instances: Vec<SequenceInstance>,
}

impl SequenceSchedule {
    /// Compute the schedule with the default configuration.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the route-data accessor.
    pub fn new<S, D>(sequence: &Sequence, selector: &S, data: &D) -> Result<Self, DataError>
    where
        S: ScheduleSelector + ?Sized,
        D: RouteData + ?Sized,
    {
        Self::with_config(sequence, selector, data, &PlannerConfig::default())
    }

    /// Compute the schedule.
    ///
    /// Walk time into level `i > 0` is the time to walk from level `i - 1`'s
    /// alighting stop to level `i`'s boarding stop; a terminal previous leg
    /// needs no walk.
    pub fn with_config<S, D>(
        sequence: &Sequence,
        selector: &S,
        data: &D,
        config: &PlannerConfig,
    ) -> Result<Self, DataError>
    where
        S: ScheduleSelector + ?Sized,
        D: RouteData + ?Sized,
    {
        let mut levels: Vec<Level> = sequence.legs().iter().cloned().map(Level::new).collect();

        let metric = data.metric();
        for i in 1..levels.len() {
            let walk_time = match levels[i - 1].leg().stop2() {
                Some(prev_stop2) => {
                    let metres = metric.distance(prev_stop2, levels[i].leg().stop1());
                    config.transfer_time(metres)
                }
                None => Duration::zero(),
            };
            levels[i].set_walk_time(walk_time);
        }

        for level in &mut levels {
            level.compute(selector, data)?;
        }

        let instances = create_instances(&levels);
        debug!(
            legs = levels.len(),
            instances = instances.len(),
            "Computed sequence schedule"
        );

        Ok(Self { levels, instances })
    }

    /// Itineraries in ascending order of start time.
    pub fn instances(&self) -> &[SequenceInstance] {
        &self.instances
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Walk time into each level, index-aligned with the sequence.
    pub fn walk_times(&self) -> Vec<Duration> {
        self.levels.iter().map(|l| l.walk_time()).collect()
    }

    /// Index of the first itinerary starting at or after `time`, or `None`
    /// if every itinerary starts earlier.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_planner::domain::{ScheduleTime, Sequence};
    /// use bus_planner::data::MemoryRouteData;
    /// use bus_planner::planner::SequenceSchedule;
    /// use bus_planner::schedule::{DayType, DayTypeSelector};
    ///
    /// let data = MemoryRouteData::default();
    /// let selector = DayTypeSelector::new(DayType::new("weekday"));
    /// let schedule = SequenceSchedule::new(&Sequence::default(), &selector, &data).unwrap();
    ///
    /// assert!(schedule.instances().is_empty());
    /// assert_eq!(schedule.time_position(ScheduleTime::MIDNIGHT), None);
    /// ```
    pub fn time_position(&self, time: ScheduleTime) -> Option<usize> {
        let pos = self.instances.partition_point(|i| i.start_time() < time);
        (pos < self.instances.len()).then_some(pos)
    }

    /// As [`time_position`](Self::time_position), for minutes since midnight.
    pub fn time_position_minutes(&self, minutes: u32) -> Option<usize> {
        self.time_position(ScheduleTime::from_minutes(minutes))
    }

    /// As [`time_position`](Self::time_position), for the time of day of a
    /// local date-time.
    pub fn time_position_at(&self, datetime: NaiveDateTime) -> Option<usize> {
        self.time_position(ScheduleTime::from_datetime(datetime))
    }
}

/// Chain levels forward from each departure of the first level.
///
/// Chaining stops for good at the first anchor that cannot be completed:
/// later anchors are not tried.
fn create_instances(levels: &[Level]) -> Vec<SequenceInstance> {
    let mut instances = Vec::new();
    let Some((first, rest)) = levels.split_first() else {
        return instances;
    };

    'anchors: for (anchor, first_time) in first.leg_times().iter().enumerate() {
        let mut chosen = Vec::with_capacity(levels.len());
        chosen.push(first_time.clone());
        let mut time = first_time.time2();

        for (offset, level) in rest.iter().enumerate() {
            time = time.saturating_add(level.walk_time());
            match level.find_time_index(time) {
                Some(idx) => {
                    let lt = &level.leg_times()[idx];
                    time = lt.time2();
                    chosen.push(lt.clone());
                }
                None => {
                    trace!(
                        anchor,
                        level = offset + 1,
                        after = %time,
                        "No further service, chaining stopped"
                    );
                    break 'anchors;
                }
            }
        }

        instances.push(SequenceInstance::new(chosen));
    }

    instances
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
