//! Stop identifier and location types.

use std::fmt;

/// Error returned when parsing an invalid stop symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop symbol: {reason}")]
pub struct InvalidStopSymbol {
    reason: &'static str,
}

/// Maximum length of a stop symbol in bytes.
const MAX_SYMBOL_LEN: usize = 32;

/// The identifier of a stop as it appears in route data.
///
/// Symbols are non-empty, at most 32 bytes, and contain no whitespace or
/// `:` (which separates fields in leg descriptions). This type guarantees
/// that any `StopSymbol` value is valid by construction.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::StopSymbol;
///
/// let syntagma = StopSymbol::parse("060011").unwrap();
/// assert_eq!(syntagma.as_str(), "060011");
///
/// assert!(StopSymbol::parse("").is_err());
/// assert!(StopSymbol::parse("A B").is_err());
/// assert!(StopSymbol::parse("A:B").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopSymbol(String);

impl StopSymbol {
    /// Parse a stop symbol from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopSymbol> {
        if s.is_empty() {
            return Err(InvalidStopSymbol {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_SYMBOL_LEN {
            return Err(InvalidStopSymbol {
                reason: "must be at most 32 bytes",
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(InvalidStopSymbol {
                reason: "must not contain whitespace or ':'",
            });
        }

        Ok(StopSymbol(s.to_string()))
    }

    /// Returns the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopSymbol({})", self.0)
    }
}

impl fmt::Display for StopSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A stop: its symbol, display name and location.
///
/// Stops are sourced from route data and never change afterwards.
/// Equality is by symbol only.
#[derive(Debug, Clone)]
pub struct Stop {
    pub symbol: StopSymbol,
    pub name: String,
    pub location: Point,
}

impl Stop {
    pub fn new(symbol: StopSymbol, name: impl Into<String>, location: Point) -> Self {
        Self {
            symbol,
            name: name.into(),
            location,
        }
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Stop {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Za-z0-9_.-]{1,32}") {
            let symbol = StopSymbol::parse(&s).unwrap();
            prop_assert_eq!(symbol.as_str(), s.as_str());
        }

        /// Anything containing a space is rejected
        #[test]
        fn whitespace_rejected(a in "[A-Z]{0,10}", b in "[A-Z]{0,10}") {
            let s = format!("{a} {b}");
            prop_assert!(StopSymbol::parse(&s).is_err());
        }
    }
}
