//! Terminal rendering of the counter.
//!
//! Everything in this module produces plain strings, so the layout can be
//! tested without a terminal. The binary decides where the strings go and
//! how often they are refreshed.

use vigil::elapsed::ElapsedTime;
use vigil::timestamp::UnixTimestamp;
use vigil::units::format_unit;

use crate::config::Organization;

/// Renders the static header shown once, above the refreshing counter line.
pub fn render_header(title: &str, start: UnixTimestamp) -> String {
    let started = start.datetime().format("%B %-d, %Y at %H:%M:%S UTC");
    format!("{title}\n{}\nCounting since {started}\n", "=".repeat(title.len()))
}

/// Renders the refreshing counter line for one reading.
pub fn render_counter_line(elapsed: &ElapsedTime) -> String {
    format!(
        "{elapsed} ({} / {} in total)",
        format_unit(elapsed.total_days, "day"),
        format_unit(elapsed.total_hours, "hour"),
    )
}

/// Renders the list of donation organizations shown under the header.
pub fn render_organizations(organizations: &[Organization]) -> String {
    let mut out = String::from("Donate to:\n");
    for org in organizations {
        out.push_str(&format!("  - {} [{}]: {}\n    {}\n", org.name, org.category, org.description, org.url));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_counter_line, render_header, render_organizations};
    use crate::config::{AgentConfig, Organization, OrgCategory};
    use vigil::elapsed::calculate_elapsed_time;
    use vigil::timestamp::UnixTimestamp;

    #[test]
    fn header_shows_title_and_start_date() {
        let start = UnixTimestamp::new(1696809120.0).unwrap();
        let header = render_header("Solidarity", start);
        assert_eq!(header, "Solidarity\n==========\nCounting since October 8, 2023 at 23:52:00 UTC\n");
    }

    #[test]
    fn counter_line_pluralizes_every_field() {
        let elapsed = calculate_elapsed_time(1696809120.0, 1696809120.0 + 86400.0).unwrap();
        assert_eq!(
            render_counter_line(&elapsed),
            "0 years, 0 months, 1 day, 0 hours, 0 minutes, 0 seconds (1 day / 24 hours in total)"
        );
    }

    #[test]
    fn organization_list_shows_name_category_and_url() {
        let orgs = vec![Organization {
            name: String::from("PCRF"),
            url: String::from("https://www.pcrf.net/"),
            description: String::from("children's relief"),
            category: OrgCategory::Children,
        }];
        let rendered = render_organizations(&orgs);
        assert_eq!(
            rendered,
            "Donate to:\n  - PCRF [children]: children's relief\n    https://www.pcrf.net/\n"
        );
    }

    #[test]
    fn default_organizations_all_render() {
        let config = AgentConfig::default();
        let rendered = render_organizations(&config.organizations);
        for org in &config.organizations {
            assert!(rendered.contains(&org.name));
            assert!(rendered.contains(&org.url));
        }
    }
}
