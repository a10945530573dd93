//! Route data access seam.

use std::sync::Arc;

use crate::domain::{DomainError, Leg, RouteId, StopSymbol};
use crate::schedule::Schedule;
use crate::walk::Metric;

/// Errors from the route-data accessor.
///
/// The planner never catches or retries these; they abort the computation
/// that needed the data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// No route with this id is known
    #[error("unknown route: {0}")]
    UnknownRoute(RouteId),

    /// No stop with this symbol is known
    #[error("unknown stop: {0}")]
    UnknownStop(StopSymbol),

    /// Route data contains an invalid value
    #[error("invalid route data: {0}")]
    Invalid(#[from] DomainError),

    /// A route's stop list is inconsistent
    #[error("invalid route {route}: {reason}")]
    InvalidRoute { route: RouteId, reason: &'static str },

    /// Reading route data failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Route data is not valid JSON for the expected format
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Access to already-loaded route data.
///
/// Implementations must present a consistent snapshot for the duration of
/// a single schedule computation.
pub trait RouteData {
    /// All legs, on any route, that board at `stop1` and alight at `stop2`.
    fn legs_between(&self, stop1: &StopSymbol, stop2: &StopSymbol)
    -> Result<Vec<Leg>, DataError>;

    /// All timetables of a route.
    fn schedule(&self, route_id: &RouteId) -> Result<Arc<Schedule>, DataError>;

    /// Distance between stops, for walks between legs.
    fn metric(&self) -> &dyn Metric;
}
