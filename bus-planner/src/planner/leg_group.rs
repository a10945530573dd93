//! A single leg with its interchangeable alternatives.
//!
//! Used when one transfer point is edited or queried on its own, outside a
//! full sequence schedule.

use std::fmt;

use chrono::Duration;

use crate::domain::{DomainError, Leg, RouteId, RouteStop, Stop};

use super::equivalence::equivalent_legs;
use super::provider::{DataError, RouteData};

/// A leg, the time it requires after the previous leg, and its
/// equivalence class resolved on first use.
///
/// Replacing either endpoint discards the resolved class.
#[derive(Debug, Clone)]
pub struct LegGroup {
    leg: Leg,
    wait: Duration,
    equivalent: Option<Vec<Leg>>,
}

impl LegGroup {
    pub fn new(leg: Leg) -> Self {
        Self {
            leg,
            wait: Duration::zero(),
            equivalent: None,
        }
    }

    pub fn leg(&self) -> &Leg {
        &self.leg
    }

    pub fn route_id(&self) -> &RouteId {
        self.leg.route_id()
    }

    pub fn stop1(&self) -> &Stop {
        self.leg.stop1()
    }

    pub fn stop2(&self) -> Option<&Stop> {
        self.leg.stop2()
    }

    pub fn route_stop1(&self) -> &RouteStop {
        self.leg.route_stop1()
    }

    /// Required time from the previous leg.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn set_wait(&mut self, wait: Duration) {
        self.wait = wait;
    }

    /// Replace the boarding stop.
    ///
    /// # Errors
    ///
    /// Returns `Err` (leaving the group unchanged) if the new stop would not
    /// precede the alighting stop.
    pub fn set_stop1(&mut self, stop1: RouteStop) -> Result<(), DomainError> {
        self.leg = self.leg.with_stop1(stop1)?;
        self.equivalent = None;
        Ok(())
    }

    /// Replace (or remove) the alighting stop.
    ///
    /// # Errors
    ///
    /// Returns `Err` (leaving the group unchanged) if the new stop would not
    /// follow the boarding stop.
    pub fn set_stop2(&mut self, stop2: Option<RouteStop>) -> Result<(), DomainError> {
        self.leg = self.leg.with_stop2(stop2)?;
        self.equivalent = None;
        Ok(())
    }

    /// The resolved class, if it has been resolved since the last stop change.
    pub fn cached_legs(&self) -> Option<&[Leg]> {
        self.equivalent.as_deref()
    }

    /// All legs interchangeable with this one, resolving them on first use.
    pub fn equivalent_legs<D>(&mut self, data: &D) -> Result<&[Leg], DataError>
    where
        D: RouteData + ?Sized,
    {
        if self.equivalent.is_none() {
            self.equivalent = Some(equivalent_legs(data, &self.leg)?);
        }
        Ok(self.equivalent.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for LegGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.leg)?;
        if !self.wait.is_zero() {
            write!(f, " (wait {}\")", self.wait.num_seconds())?;
        }
        Ok(())
    }
}
