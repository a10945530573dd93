//! Timetable time handling.
//!
//! Timetables express times as seconds since local midnight of the day the
//! timetable applies to. Service that continues past midnight keeps
//! counting, so `25:10` is ten past one on the following morning but still
//! belongs to the previous day's timetable. No timezone conversion happens
//! anywhere in this module.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Seconds in one day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Largest hour accepted when parsing; timetables run at most one day over.
const MAX_HOUR: u32 = 47;

/// A time of day on a timetable, in whole seconds since midnight.
///
/// Values at or above [`SECONDS_PER_DAY`] represent post-midnight service
/// that continues the previous day's timetable.
///
/// # Examples
///
/// ```
/// use bus_planner::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(t.seconds(), 14 * 3600 + 30 * 60);
/// assert_eq!(t.to_string(), "14:30");
///
/// let late = ScheduleTime::parse_hhmm("25:10").unwrap();
/// assert!(late.is_next_day());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ScheduleTime(u32);

impl ScheduleTime {
    /// Midnight at the start of the timetable's day.
    pub const MIDNIGHT: ScheduleTime = ScheduleTime(0);

    /// Create a time from seconds since midnight.
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Create a time from minutes since midnight.
    ///
    /// Saturates at the largest representable time.
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes.saturating_mul(60))
    }

    /// Create a time from hour, minute and second components.
    ///
    /// Hours may exceed 23 for post-midnight service.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if hour > MAX_HOUR {
            return Err(TimeError::new("hour must be 0-47"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
        Ok(Self(hour * 3600 + minute * 60 + second))
    }

    /// Parse a time from "HH:MM" or "HH:MM:SS" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_planner::domain::ScheduleTime;
    ///
    /// assert!(ScheduleTime::parse_hhmm("00:00").is_ok());
    /// assert!(ScheduleTime::parse_hhmm("23:59").is_ok());
    /// assert!(ScheduleTime::parse_hhmm("07:05:30").is_ok());
    /// assert!(ScheduleTime::parse_hhmm("24:15").is_ok());
    ///
    /// assert!(ScheduleTime::parse_hhmm("1430").is_err());
    /// assert!(ScheduleTime::parse_hhmm("14:3").is_err());
    /// assert!(ScheduleTime::parse_hhmm("48:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        // HH:MM or HH:MM:SS
        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        let second = if bytes.len() == 8 {
            if bytes[5] != b':' {
                return Err(TimeError::new("expected colon at position 5"));
            }
            parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?
        } else {
            0
        };

        Self::from_hms(hour, minute, second)
    }

    /// Time of day of a wall-clock time, without any timezone conversion.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self(time.num_seconds_from_midnight())
    }

    /// Time of day of a date-time; the date part is ignored.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::from_naive_time(datetime.time())
    }

    /// Returns seconds since midnight.
    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Returns whole minutes since midnight.
    pub fn minutes(&self) -> u32 {
        self.0 / 60
    }

    /// Returns true for post-midnight service belonging to the previous day.
    pub fn is_next_day(&self) -> bool {
        self.0 >= SECONDS_PER_DAY
    }

    /// Wall-clock time of day, wrapping post-midnight values.
    pub fn to_naive_time(&self) -> NaiveTime {
        // always below SECONDS_PER_DAY after rem
        NaiveTime::from_num_seconds_from_midnight_opt(self.0 % SECONDS_PER_DAY, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Add a duration, returning `None` on overflow or if the result would
    /// be before midnight.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let seconds = i64::from(self.0).checked_add(duration.num_seconds())?;
        u32::try_from(seconds).ok().map(Self)
    }

    /// Add a duration, saturating at both ends of the representable range.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let seconds = i64::from(self.0).saturating_add(duration.num_seconds());
        Self(seconds.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Returns the signed duration from `other` to `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        Duration::seconds(i64::from(self.0) - i64::from(other.0))
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScheduleTime({:02}:{:02}:{:02})",
            self.0 / 3600,
            (self.0 / 60) % 60,
            self.0 % 60
        )
    }
}

/// Formats as `HH:MM`, keeping hours past 23 for post-midnight service.
impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 3600, (self.0 / 60) % 60)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
