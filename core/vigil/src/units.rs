//! Time units for displaying elapsed durations.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use anyhow::anyhow;

/// A calendar or clock unit of an elapsed-time breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// All units, from largest to smallest, in the order a breakdown is displayed.
pub const ALL_UNITS: [TimeUnit; 6] = [
    TimeUnit::Year,
    TimeUnit::Month,
    TimeUnit::Day,
    TimeUnit::Hour,
    TimeUnit::Minute,
    TimeUnit::Second,
];

impl TimeUnit {
    /// Returns the singular English name of the unit.
    pub fn singular_name(&self) -> &str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }

    /// Returns the plural English name of the unit.
    pub fn plural_name(&self) -> &str {
        match self {
            TimeUnit::Year => "years",
            TimeUnit::Month => "months",
            TimeUnit::Day => "days",
            TimeUnit::Hour => "hours",
            TimeUnit::Minute => "minutes",
            TimeUnit::Second => "seconds",
        }
    }

    /// Returns the name to use for displaying `value` of this unit:
    /// the singular name iff `value` is exactly 1.
    pub fn name_for(&self, value: u64) -> &str {
        if value == 1 { self.singular_name() } else { self.plural_name() }
    }

    /// Renders `value` together with the correctly pluralized unit name,
    /// e.g. `1 day` or `23 hours`.
    pub fn format(&self, value: u64) -> String {
        format!("{value} {}", self.name_for(value))
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular_name())
    }
}

impl FromStr for TimeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let res = match s {
            "year" => TimeUnit::Year,
            "month" => TimeUnit::Month,
            "day" => TimeUnit::Day,
            "hour" => TimeUnit::Hour,
            "minute" => TimeUnit::Minute,
            "second" => TimeUnit::Second,
            _ => return Err(anyhow!("unknown time unit: {s}")),
        };
        Ok(res)
    }
}

/// Formats a value with an arbitrary unit name, appending a trailing `s`
/// unless the value is exactly 1.
pub fn format_unit(value: u64, unit_name: &str) -> String {
    if value == 1 {
        format!("{value} {unit_name}")
    } else {
        format!("{value} {unit_name}s")
    }
}
