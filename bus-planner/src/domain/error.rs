//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from route-data access errors.

use super::{InvalidStopSymbol, TimeError};

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Stop symbol failed validation
    #[error(transparent)]
    StopSymbol(#[from] InvalidStopSymbol),

    /// Time string failed validation
    #[error(transparent)]
    Time(#[from] TimeError),

    /// Invalid leg construction (e.g., alight before board)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// A computed time does not fit the timetable range
    #[error("time out of range")]
    TimeOverflow,
}
