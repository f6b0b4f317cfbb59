//! Agent configuration options.
//!
//! The configuration is immutable data handed to the display layer: the
//! fixed start date of the counter, the refresh interval, the heading, and
//! the list of donation organizations. We use `serde` to parse these options
//! from the TOML config file and to write the default configuration back to
//! it on the first run.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Start of the reference counter: October 8, 2023, 23:52:00 UTC.
pub const DEFAULT_START_TIMESTAMP: f64 = 1696809120.0;

/// Configuration of the counter agent.
#[derive(Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// UNIX timestamp (seconds since the epoch, UTC) the counter starts at.
    pub start_timestamp: f64,

    /// How often the displayed counter refreshes, in humantime syntax
    /// (e.g. `1s`, `500ms`).
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,

    /// Heading displayed above the counter.
    pub title: String,

    /// Donation organizations listed under the counter.
    pub organizations: Vec<Organization>,
}

/// A humanitarian organization accepting donations.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Organization {
    pub name: String,
    pub url: String,
    pub description: String,
    pub category: OrgCategory,
}

/// What kind of relief work an organization focuses on.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrgCategory {
    Humanitarian,
    Medical,
    Children,
}

impl fmt::Display for OrgCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrgCategory::Humanitarian => "humanitarian",
            OrgCategory::Medical => "medical",
            OrgCategory::Children => "children",
        };
        f.write_str(name)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start_timestamp: DEFAULT_START_TIMESTAMP,
            refresh_interval: Duration::from_secs(1),
            title: String::from("Palestine Solidarity Counter"),
            organizations: vec![
                Organization {
                    name: String::from("UNRWA"),
                    url: String::from("https://donate.unrwa.org"),
                    description: String::from("United Nations Relief and Works Agency for Palestine Refugees"),
                    category: OrgCategory::Humanitarian,
                },
                Organization {
                    name: String::from("Palestine Red Crescent Society (PRCS)"),
                    url: String::from("https://www.palestinercs.org/en"),
                    description: String::from("Emergency medical services and humanitarian aid in Palestine"),
                    category: OrgCategory::Medical,
                },
                Organization {
                    name: String::from("Palestine Children's Relief Fund (PCRF)"),
                    url: String::from("https://www.pcrf.net/"),
                    description: String::from("Medical care and humanitarian relief for Palestinian children"),
                    category: OrgCategory::Children,
                },
            ],
        }
    }
}
