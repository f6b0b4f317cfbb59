//! Calendar-aware elapsed-time calculation.
//!
//! The entry point is [`calculate_elapsed_time`], which validates a pair of
//! UNIX timestamps and decomposes their difference into an [`ElapsedTime`].
//! The decomposition is calendar-accurate: advancing by one month means
//! advancing the month field on the UTC calendar, with the month length and
//! leap days taken into account, not adding a fixed 30-day block.
//!
//! # Example
//! ```
//! use vigil::elapsed::calculate_elapsed_time;
//!
//! // one day after the counter start date
//! let elapsed = calculate_elapsed_time(1696809120.0, 1696809120.0 + 86400.0)?;
//! assert_eq!(elapsed.days, 1);
//! assert_eq!(elapsed.total_hours, 24);
//! # Ok::<(), vigil::timestamp::InvalidTimestampError>(())
//! ```

use std::fmt;

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::{InvalidTimestampError, UnixTimestamp};
use crate::units::{ALL_UNITS, TimeUnit};

/// Number of seconds in a minute.
pub const SECONDS_PER_MINUTE: i64 = 60;
/// Number of seconds in an hour.
pub const SECONDS_PER_HOUR: i64 = 3600;
/// Number of seconds in a day.
pub const SECONDS_PER_DAY: i64 = 86400;

/// A time span broken down on the UTC calendar.
///
/// The six calendar fields are remainders: `months` only counts the months
/// that did not fit into a whole year, `days` only the days that did not fit
/// into a whole month, and so on. The two totals are flat measures of the
/// entire span and are independent of the calendar breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedTime {
    /// Whole calendar years elapsed.
    pub years: u32,
    /// Whole calendar months elapsed, after subtracting `years`.
    pub months: u32,
    /// Whole days elapsed, after subtracting `years` and `months`.
    pub days: u32,
    /// Whole hours elapsed, after subtracting the fields above.
    pub hours: u32,
    /// Whole minutes elapsed, after subtracting the fields above.
    pub minutes: u32,
    /// Whole seconds elapsed, after subtracting the fields above.
    pub seconds: u32,
    /// Flat total of whole days in the span, `floor((end - start) / 86400)`.
    pub total_days: u64,
    /// Flat total of whole hours in the span, `floor((end - start) / 3600)`.
    pub total_hours: u64,
}

impl ElapsedTime {
    /// The all-zero span.
    pub const ZERO: ElapsedTime = ElapsedTime {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        total_days: 0,
        total_hours: 0,
    };

    /// Returns true if every field of the span is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns the calendar field corresponding to `unit`.
    pub fn field(&self, unit: TimeUnit) -> u64 {
        let value = match unit {
            TimeUnit::Year => self.years,
            TimeUnit::Month => self.months,
            TimeUnit::Day => self.days,
            TimeUnit::Hour => self.hours,
            TimeUnit::Minute => self.minutes,
            TimeUnit::Second => self.seconds,
        };
        u64::from(value)
    }

    /// Computes the span between two validated timestamps.
    ///
    /// If `end` is before `start`, the result is [`ElapsedTime::ZERO`]:
    /// a counter whose start date lies in the future reads zero instead of
    /// going negative or failing.
    pub fn between(start: UnixTimestamp, end: UnixTimestamp) -> ElapsedTime {
        if end < start {
            return ElapsedTime::ZERO;
        }

        let total_seconds = end.as_secs_f64() - start.as_secs_f64();
        let total_days = (total_seconds / SECONDS_PER_DAY as f64).floor() as u64;
        let total_hours = (total_seconds / SECONDS_PER_HOUR as f64).floor() as u64;

        // Walk a cursor from `start` towards `end`, one calendar field at a
        // time. chrono normalizes month-end overflow by clamping to the last
        // valid day (Jan 31 + 1 month = Feb 28/29).
        let end_date = end.datetime();
        let mut cursor = start.datetime();
        let years = advance_while(&mut cursor, end_date, |d| d.checked_add_months(Months::new(12)));
        let months = advance_while(&mut cursor, end_date, |d| d.checked_add_months(Months::new(1)));
        let days = advance_while(&mut cursor, end_date, |d| d.checked_add_days(Days::new(1)));

        // At this point the cursor is less than one day away from `end`.
        let remaining = (end_date - cursor).num_seconds();
        let hours = (remaining / SECONDS_PER_HOUR) as u32;
        let minutes = ((remaining % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32;
        let seconds = (remaining % SECONDS_PER_MINUTE) as u32;

        ElapsedTime {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            total_days,
            total_hours,
        }
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for unit in ALL_UNITS {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            f.write_str(&unit.format(self.field(unit)))?;
        }
        Ok(())
    }
}

/// Computes the calendar breakdown of the span between two raw UNIX
/// timestamps (seconds since the epoch, fractional permitted).
///
/// Both inputs are validated first; NaN, infinite or negative values fail
/// with [`InvalidTimestampError`]. A span with `end < start` is not an
/// error and yields [`ElapsedTime::ZERO`].
pub fn calculate_elapsed_time(start: f64, end: f64) -> Result<ElapsedTime, InvalidTimestampError> {
    let start = UnixTimestamp::new(start)?;
    let end = UnixTimestamp::new(end)?;
    Ok(ElapsedTime::between(start, end))
}

/// Advances `cursor` by `step` as long as the result does not exceed `end`,
/// and returns the number of advances.
fn advance_while<F>(cursor: &mut DateTime<Utc>, end: DateTime<Utc>, step: F) -> u32
where
    F: Fn(DateTime<Utc>) -> Option<DateTime<Utc>>,
{
    let mut count = 0;
    while let Some(next) = step(*cursor) {
        if next > end {
            break;
        }
        *cursor = next;
        count += 1;
    }
    count
}

/// Returns true if `year` is a leap year of the proleptic Gregorian
/// calendar: divisible by 4, except centuries, which must be divisible
/// by 400. Year 0 is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Error returned by [`days_in_month`] for a month outside `1..=12`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid month {0}, expected a value between 1 and 12")]
pub struct InvalidMonthError(pub u32);

/// Returns the number of days in the given month (1-12) of the given year,
/// with February lasting 29 days in leap years.
pub fn days_in_month(month: u32, year: i32) -> Result<u32, InvalidMonthError> {
    const DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    match month {
        2 if is_leap_year(year) => Ok(29),
        1..=12 => Ok(DAYS[(month - 1) as usize]),
        other => Err(InvalidMonthError(other)),
    }
}
