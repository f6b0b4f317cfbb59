//! UNIX timestamps and their validation.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A point in time, counted in seconds since the UNIX epoch (UTC).
///
/// Fractional seconds are permitted: `1696809120.5` is half a second past
/// `2023-10-08T23:52:00Z`. A `UnixTimestamp` can only be obtained through
/// validation ([`new`](Self::new)) or from a clock ([`now`](Self::now)),
/// therefore it is always a finite, non-negative number that has an
/// equivalent UTC calendar date.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct UnixTimestamp(f64);

/// Error returned when a value cannot be used as a [`UnixTimestamp`].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidTimestampError {
    /// The value is NaN, infinite or negative.
    #[error("invalid timestamp {0}: expected a finite number of seconds >= 0")]
    Malformed(f64),
    /// The value is a valid number of seconds but has no representable
    /// UTC calendar date.
    #[error("timestamp {0} is beyond the supported calendar range")]
    OutOfRange(f64),
}

impl UnixTimestamp {
    /// The UNIX epoch, `1970-01-01T00:00:00Z`.
    pub const EPOCH: UnixTimestamp = UnixTimestamp(0.0);

    /// Validates `secs` and turns it into a `UnixTimestamp`.
    pub fn new(secs: f64) -> Result<Self, InvalidTimestampError> {
        if !Self::is_valid(secs) {
            return Err(InvalidTimestampError::Malformed(secs));
        }
        let ts = Self(secs);
        match DateTime::from_timestamp(ts.whole_secs(), ts.subsec_nanos()) {
            Some(_) => Ok(ts),
            None => Err(InvalidTimestampError::OutOfRange(secs)),
        }
    }

    /// Returns true iff `secs` is a finite, non-negative number (not NaN).
    ///
    /// This is the validity criterion for counter inputs. Note that a valid
    /// number can still be rejected by [`new`](Self::new) if it lies beyond
    /// the calendar range supported by the date library.
    pub fn is_valid(secs: f64) -> bool {
        secs.is_finite() && secs >= 0.0
    }

    /// Returns a `UnixTimestamp` representing the current system time.
    pub fn now() -> Self {
        let t = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        Self(t.as_secs_f64())
    }

    /// The raw number of seconds since the epoch.
    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }

    /// The equivalent date and time on the UTC calendar.
    pub fn datetime(&self) -> DateTime<Utc> {
        // cannot fail: the range was checked on construction
        DateTime::from_timestamp(self.whole_secs(), self.subsec_nanos()).unwrap()
    }

    fn whole_secs(&self) -> i64 {
        self.0.trunc() as i64
    }

    fn subsec_nanos(&self) -> u32 {
        (self.0.fract() * 1e9) as u32
    }
}

impl TryFrom<SystemTime> for UnixTimestamp {
    type Error = InvalidTimestampError;

    fn try_from(value: SystemTime) -> Result<Self, Self::Error> {
        match value.duration_since(UNIX_EPOCH) {
            Ok(t) => Self::new(t.as_secs_f64()),
            // before the epoch: report the (negative) number of seconds
            Err(e) => Err(InvalidTimestampError::Malformed(-e.duration().as_secs_f64())),
        }
    }
}

impl TryFrom<DateTime<Utc>> for UnixTimestamp {
    type Error = InvalidTimestampError;

    fn try_from(value: DateTime<Utc>) -> Result<Self, Self::Error> {
        let secs = value.timestamp() as f64 + f64::from(value.timestamp_subsec_nanos()) / 1e9;
        Self::new(secs)
    }
}

impl fmt::Display for UnixTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for UnixTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.0, self.datetime())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::{InvalidTimestampError, UnixTimestamp};

    #[test]
    fn validity() {
        assert!(UnixTimestamp::is_valid(0.0));
        assert!(UnixTimestamp::is_valid(1696809120.0));
        assert!(UnixTimestamp::is_valid(0.25));
        assert!(!UnixTimestamp::is_valid(-1.0));
        assert!(!UnixTimestamp::is_valid(f64::NAN));
        assert!(!UnixTimestamp::is_valid(f64::INFINITY));
        assert!(!UnixTimestamp::is_valid(f64::NEG_INFINITY));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(UnixTimestamp::new(-1.0), Err(InvalidTimestampError::Malformed(-1.0)));
        assert!(matches!(
            UnixTimestamp::new(f64::NAN),
            Err(InvalidTimestampError::Malformed(_))
        ));
        assert!(matches!(
            UnixTimestamp::new(f64::INFINITY),
            Err(InvalidTimestampError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_out_of_calendar_range() {
        // finite and non-negative, but far past year 262143
        assert_eq!(
            UnixTimestamp::new(1e300),
            Err(InvalidTimestampError::OutOfRange(1e300))
        );
    }

    #[test]
    fn datetime_equivalence() {
        let ts = UnixTimestamp::new(1696809120.0).unwrap();
        let expected = Utc.with_ymd_and_hms(2023, 10, 8, 23, 52, 0).unwrap();
        assert_eq!(ts.datetime(), expected);
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let ts = UnixTimestamp::new(2.5).unwrap();
        assert_eq!(ts.datetime().timestamp_subsec_millis(), 500);
    }

    #[test]
    fn ordering_follows_seconds() {
        let early = UnixTimestamp::new(100.0).unwrap();
        let late = UnixTimestamp::new(100.5).unwrap();
        assert!(early < late);
        assert_eq!(early, UnixTimestamp::new(100.0).unwrap());
    }

    #[test]
    fn conversion_from_datetime() {
        let date = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let ts = UnixTimestamp::try_from(date).unwrap();
        assert_eq!(ts.datetime(), date);
    }
}
