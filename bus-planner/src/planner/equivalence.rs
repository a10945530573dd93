//! Equivalence classes of legs.
//!
//! Riders going from one stop to another do not care which route takes
//! them: every leg connecting the same stop pair is interchangeable. Both
//! `Level` and `LegGroup` resolve their classes here so they can never
//! disagree on what counts as equivalent.

use tracing::trace;

use crate::domain::Leg;

use super::provider::{DataError, RouteData};

/// Returns every leg interchangeable with `leg`.
///
/// For a leg with an alighting stop this is every leg the route data knows
/// between the same two stops, whatever its route. A terminal leg has no
/// stop pair to match and is only equivalent to itself.
pub fn equivalent_legs<D>(data: &D, leg: &Leg) -> Result<Vec<Leg>, DataError>
where
    D: RouteData + ?Sized,
{
    let Some(stop2) = leg.stop2() else {
        return Ok(vec![leg.clone()]);
    };

    let legs = data.legs_between(&leg.stop1().symbol, &stop2.symbol)?;
    trace!(
        leg = %leg,
        equivalent = legs.len(),
        "Resolved equivalence class"
    );
    Ok(legs)
}
