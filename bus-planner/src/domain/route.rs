//! Route identity and route stop lists.

use std::fmt;

use chrono::Duration;

use super::Stop;

/// Identifies one direction of a route.
///
/// Ordering is by route name, then direction, so routes sort the way
/// riders read them ("040/1" before "040/2" before "049/1").
///
/// # Examples
///
/// ```
/// use bus_planner::domain::RouteId;
///
/// let outbound = RouteId::new("040", "1");
/// let inbound = RouteId::new("040", "2");
/// assert!(outbound < inbound);
/// assert_eq!(outbound.to_string(), "040/1");
///
/// assert_eq!(RouteId::parse("040/2"), inbound);
/// assert_eq!(RouteId::parse("X95").direction(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId {
    name: String,
    direction: String,
}

impl RouteId {
    pub fn new(name: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: direction.into(),
        }
    }

    /// Parse `NAME/DIRECTION`; a missing direction is empty.
    pub fn parse(s: &str) -> Self {
        match s.split_once('/') {
            Some((name, direction)) => Self::new(name, direction),
            None => Self::new(s, ""),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.name, self.direction)
        }
    }
}

/// A stop as visited by a particular route.
///
/// Carries the position of the stop in the route's stop list and the time
/// it takes a vehicle to get there from the route's timetable departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStop {
    pub stop: Stop,
    /// Position in the route's stop list, starting at 0.
    pub index: usize,
    /// Travel time from the first stop of the route.
    pub offset: Duration,
}

impl RouteStop {
    pub fn new(stop: Stop, index: usize, offset: Duration) -> Self {
        Self {
            stop,
            index,
            offset,
        }
    }
}

/// A route: one direction of a line with its ordered stops.
#[derive(Debug, Clone)]
pub struct Route {
    pub id: RouteId,
    /// Short label riders see, e.g. "040".
    pub label: String,
    /// Longer descriptive title.
    pub title: String,
    pub stops: Vec<RouteStop>,
}

impl Route {
    /// Returns the first position of a stop symbol on this route at or
    /// after `from`.
    pub fn position_of(&self, symbol: &str, from: usize) -> Option<usize> {
        self.stops
            .iter()
            .skip(from)
            .position(|rs| rs.stop.symbol.as_str() == symbol)
            .map(|p| p + from)
    }

    /// Positions of the shortest ride from `from` to `to`.
    ///
    /// `to` is its first visit after the first visit of `from`; `from` is
    /// then its last visit before that, so a loop passing `from` twice
    /// boards on the later pass.
    pub fn ride_between(&self, from: &str, to: &str) -> Option<(usize, usize)> {
        let first = self.position_of(from, 0)?;
        let pos2 = self.position_of(to, first + 1)?;
        let pos1 = self.stops[first..pos2]
            .iter()
            .rposition(|rs| rs.stop.symbol.as_str() == from)
            .map_or(first, |p| p + first);
        Some((pos1, pos2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, StopSymbol};

    fn route_stop(symbol: &str, index: usize, mins: i64) -> RouteStop {
        let stop = Stop::new(StopSymbol::parse(symbol).unwrap(), symbol, Point::default());
        RouteStop::new(stop, index, Duration::minutes(mins))
    }

    #[test]
    fn route_id_ordering() {
        let mut ids = vec![
            RouteId::new("049", "1"),
            RouteId::new("040", "2"),
            RouteId::new("040", "1"),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                RouteId::new("040", "1"),
                RouteId::new("040", "2"),
                RouteId::new("049", "1"),
            ]
        );
    }

    #[test]
    fn route_id_display_and_parse() {
        assert_eq!(RouteId::new("A1", "").to_string(), "A1");
        assert_eq!(RouteId::new("A1", "2").to_string(), "A1/2");
        assert_eq!(RouteId::parse("A1/2"), RouteId::new("A1", "2"));
        assert_eq!(RouteId::parse("A1"), RouteId::new("A1", ""));
    }

    #[test]
    fn position_of_skips_earlier_visits() {
        // Loop route visiting A twice
        let route = Route {
            id: RouteId::new("L", "1"),
            label: "L".into(),
            title: "Loop".into(),
            stops: vec![
                route_stop("A", 0, 0),
                route_stop("B", 1, 5),
                route_stop("A", 2, 10),
            ],
        };

        assert_eq!(route.position_of("A", 0), Some(0));
        assert_eq!(route.position_of("A", 1), Some(2));
        assert_eq!(route.position_of("B", 2), None);
        assert_eq!(route.position_of("Z", 0), None);
    }

    #[test]
    fn ride_between_boards_at_last_visit() {
        // A -> B -> A -> C: riding A to C boards on the second pass
        let route = Route {
            id: RouteId::new("L", "1"),
            label: "L".into(),
            title: "Loop".into(),
            stops: vec![
                route_stop("A", 0, 0),
                route_stop("B", 1, 5),
                route_stop("A", 2, 10),
                route_stop("C", 3, 14),
            ],
        };

        assert_eq!(route.ride_between("A", "C"), Some((2, 3)));
        assert_eq!(route.ride_between("A", "B"), Some((0, 1)));
        assert_eq!(route.ride_between("B", "A"), Some((1, 2)));
        assert_eq!(route.ride_between("C", "A"), None);
        assert_eq!(route.ride_between("Z", "A"), None);
    }
}
