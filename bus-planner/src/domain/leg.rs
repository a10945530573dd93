//! Leg type.
//!
//! A `Leg` is a directed ride on one route from a boarding stop to an
//! alighting stop. A leg without an alighting stop is terminal: the rider
//! boards and the sequence ends there.

use std::fmt;

use chrono::Duration;

use super::{DomainError, RouteId, RouteStop, Stop};

/// A leg of a trip sequence (one route, one ride).
///
/// # Invariants
///
/// - If present, `stop2.index > stop1.index` (must travel forward on the route)
/// - If present, `stop2.offset >= stop1.offset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    route_id: RouteId,
    stop1: RouteStop,
    stop2: Option<RouteStop>,
}

impl Leg {
    /// Construct a leg between two stops of a route.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the alighting stop is not after the boarding stop,
    /// either by position or by time offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_planner::domain::{Leg, Point, RouteId, RouteStop, Stop, StopSymbol};
    /// use chrono::Duration;
    ///
    /// let stop = |s: &str| Stop::new(StopSymbol::parse(s).unwrap(), s, Point::default());
    /// let a = RouteStop::new(stop("A"), 0, Duration::zero());
    /// let b = RouteStop::new(stop("B"), 3, Duration::minutes(7));
    ///
    /// let leg = Leg::new(RouteId::new("040", "1"), a.clone(), Some(b.clone())).unwrap();
    /// assert_eq!(leg.duration(), Duration::minutes(7));
    ///
    /// // Backwards along the route is rejected
    /// assert!(Leg::new(RouteId::new("040", "1"), b, Some(a)).is_err());
    /// ```
    pub fn new(
        route_id: RouteId,
        stop1: RouteStop,
        stop2: Option<RouteStop>,
    ) -> Result<Self, DomainError> {
        if let Some(stop2) = &stop2 {
            if stop2.index <= stop1.index {
                return Err(DomainError::InvalidLeg(
                    "alighting stop must come after boarding stop",
                ));
            }
            if stop2.offset < stop1.offset {
                return Err(DomainError::InvalidLeg(
                    "alighting offset must not be before boarding offset",
                ));
            }
        }

        Ok(Self {
            route_id,
            stop1,
            stop2,
        })
    }

    /// Construct a terminal leg (no alighting stop).
    pub fn terminal(route_id: RouteId, stop1: RouteStop) -> Self {
        Self {
            route_id,
            stop1,
            stop2: None,
        }
    }

    /// Returns the route this leg rides.
    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    /// Returns the boarding stop.
    pub fn stop1(&self) -> &Stop {
        &self.stop1.stop
    }

    /// Returns the alighting stop, if any.
    pub fn stop2(&self) -> Option<&Stop> {
        self.stop2.as_ref().map(|rs| &rs.stop)
    }

    /// Returns the boarding stop as placed on the route.
    pub fn route_stop1(&self) -> &RouteStop {
        &self.stop1
    }

    /// Returns the alighting stop as placed on the route, if any.
    pub fn route_stop2(&self) -> Option<&RouteStop> {
        self.stop2.as_ref()
    }

    /// Returns true if this leg has no alighting stop.
    pub fn is_terminal(&self) -> bool {
        self.stop2.is_none()
    }

    /// Returns the riding time; zero for terminal legs.
    pub fn duration(&self) -> Duration {
        match &self.stop2 {
            Some(stop2) => stop2.offset - self.stop1.offset,
            None => Duration::zero(),
        }
    }

    /// Returns a copy of this leg with a different boarding stop.
    pub fn with_stop1(&self, stop1: RouteStop) -> Result<Self, DomainError> {
        Self::new(self.route_id.clone(), stop1, self.stop2.clone())
    }

    /// Returns a copy of this leg with a different (or no) alighting stop.
    pub fn with_stop2(&self, stop2: Option<RouteStop>) -> Result<Self, DomainError> {
        Self::new(self.route_id.clone(), self.stop1.clone(), stop2)
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.route_id, self.stop1.stop.symbol)?;
        if let Some(stop2) = &self.stop2 {
            write!(f, " -> {}", stop2.stop.symbol)?;
        }
        Ok(())
    }
}
