//! Ordered chains of legs.

use std::fmt;

use super::Leg;

/// An ordered chain of legs making up one door-to-door trip.
///
/// Consecutive legs are not required to share a stop: the rider walks from
/// one leg's alighting stop to the next leg's boarding stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    legs: Vec<Leg>,
}

impl Sequence {
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs }
    }

    /// Append a leg to the end of the sequence.
    pub fn push(&mut self, leg: Leg) {
        self.legs.push(leg);
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

impl From<Vec<Leg>> for Sequence {
    fn from(legs: Vec<Leg>) -> Self {
        Self::new(legs)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, leg) in self.legs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{leg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, RouteId, RouteStop, Stop, StopSymbol};
    use chrono::Duration;

    fn leg(route: &str, from: &str, to: &str) -> Leg {
        let stop = |s: &str, i: usize| {
            RouteStop::new(
                Stop::new(StopSymbol::parse(s).unwrap(), s, Point::default()),
                i,
                Duration::minutes(i as i64),
            )
        };
        Leg::new(RouteId::new(route, "1"), stop(from, 0), Some(stop(to, 1))).unwrap()
    }

    #[test]
    fn empty_sequence() {
        let seq = Sequence::default();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.to_string(), "");
    }

    #[test]
    fn push_keeps_order() {
        let mut seq = Sequence::default();
        seq.push(leg("040", "A", "B"));
        seq.push(leg("550", "C", "D"));

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.legs()[0].route_id().name(), "040");
        assert_eq!(seq.legs()[1].route_id().name(), "550");
        assert_eq!(seq.to_string(), "040/1 A -> B, 550/1 C -> D");
    }

    #[test]
    fn from_vec() {
        let seq: Sequence = vec![leg("040", "A", "B")].into();
        assert_eq!(seq, Sequence::new(vec![leg("040", "A", "B")]));
    }
}
