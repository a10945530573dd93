//! Scheduled occurrences of legs.

use std::fmt;

use chrono::Duration;

use super::{DomainError, Leg, ScheduleTime};

/// One scheduled occurrence of a leg: board at `time1`, alight at `time2`.
///
/// Built from a timetable departure of the leg's route by adding the stop
/// offsets of the boarding and alighting stops. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegTime {
    leg: Leg,
    time1: ScheduleTime,
    time2: ScheduleTime,
}

impl LegTime {
    /// Materialise the occurrence of `leg` on the vehicle that leaves the
    /// start of its route at `route_departure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_planner::domain::{
    ///     Leg, LegTime, Point, RouteId, RouteStop, ScheduleTime, Stop, StopSymbol,
    /// };
    /// use chrono::Duration;
    ///
    /// let stop = |s: &str| Stop::new(StopSymbol::parse(s).unwrap(), s, Point::default());
    /// let leg = Leg::new(
    ///     RouteId::new("040", "1"),
    ///     RouteStop::new(stop("A"), 1, Duration::minutes(4)),
    ///     Some(RouteStop::new(stop("B"), 5, Duration::minutes(15))),
    /// )
    /// .unwrap();
    ///
    /// let lt = LegTime::new(leg, ScheduleTime::parse_hhmm("10:00").unwrap()).unwrap();
    /// assert_eq!(lt.time1().to_string(), "10:04");
    /// assert_eq!(lt.time2().to_string(), "10:15");
    /// ```
    pub fn new(leg: Leg, route_departure: ScheduleTime) -> Result<Self, DomainError> {
        let time1 = route_departure
            .checked_add(leg.route_stop1().offset)
            .ok_or(DomainError::TimeOverflow)?;
        let time2 = time1
            .checked_add(leg.duration())
            .ok_or(DomainError::TimeOverflow)?;

        Ok(Self { leg, time1, time2 })
    }

    pub fn leg(&self) -> &Leg {
        &self.leg
    }

    /// Departure from the boarding stop.
    pub fn time1(&self) -> ScheduleTime {
        self.time1
    }

    /// Arrival at the alighting stop; equals `time1` for terminal legs.
    pub fn time2(&self) -> ScheduleTime {
        self.time2
    }

    pub fn duration(&self) -> Duration {
        self.time2.signed_duration_since(self.time1)
    }

    /// Ordering key of this occurrence when it sits at `level` of a sequence.
    pub fn key(&self, level: usize) -> LegTimeKey {
        LegTimeKey {
            level,
            departure: self.time1,
        }
    }
}

impl fmt::Display for LegTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.leg, self.time1, self.time2)
    }
}

/// Composite ordering key for leg occurrences across a sequence:
/// position in the sequence first, then departure time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LegTimeKey {
    pub level: usize,
    pub departure: ScheduleTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, RouteId, RouteStop, Stop, StopSymbol};

    fn route_stop(symbol: &str, index: usize, mins: i64) -> RouteStop {
        let stop = Stop::new(StopSymbol::parse(symbol).unwrap(), symbol, Point::default());
        RouteStop::new(stop, index, Duration::minutes(mins))
    }

    fn t(s: &str) -> ScheduleTime {
        ScheduleTime::parse_hhmm(s).unwrap()
    }

    fn leg() -> Leg {
        Leg::new(
            RouteId::new("040", "1"),
            route_stop("A", 2, 6),
            Some(route_stop("B", 4, 20)),
        )
        .unwrap()
    }

    #[test]
    fn times_follow_offsets() {
        let lt = LegTime::new(leg(), t("08:00")).unwrap();
        assert_eq!(lt.time1(), t("08:06"));
        assert_eq!(lt.time2(), t("08:20"));
        assert_eq!(lt.duration(), Duration::minutes(14));
        assert_eq!(lt.leg(), &leg());
    }

    #[test]
    fn terminal_leg_arrives_when_it_departs() {
        let leg = Leg::terminal(RouteId::new("040", "1"), route_stop("A", 2, 6));
        let lt = LegTime::new(leg, t("08:00")).unwrap();
        assert_eq!(lt.time1(), lt.time2());
        assert_eq!(lt.duration(), Duration::zero());
    }

    #[test]
    fn post_midnight_departures() {
        let lt = LegTime::new(leg(), t("24:50")).unwrap();
        assert_eq!(lt.time2(), t("25:10"));
    }

    #[test]
    fn overflow_is_an_error() {
        let result = LegTime::new(leg(), ScheduleTime::from_seconds(u32::MAX - 10));
        assert!(matches!(result, Err(DomainError::TimeOverflow)));
    }

    #[test]
    fn keys_order_by_level_then_departure() {
        let early = LegTime::new(leg(), t("08:00")).unwrap();
        let late = LegTime::new(leg(), t("09:00")).unwrap();

        assert!(early.key(0) < late.key(0));
        assert!(late.key(0) < early.key(1));
        assert_eq!(early.key(1).departure, t("08:06"));
    }

    #[test]
    fn display() {
        let lt = LegTime::new(leg(), t("08:00")).unwrap();
        assert_eq!(lt.to_string(), "040/1 A -> B 08:06-08:20");
    }
}
