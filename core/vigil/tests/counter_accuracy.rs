//! End-to-end accuracy checks of the counter, through the public API only.

use pretty_assertions::assert_eq;

use vigil::counter::Counter;
use vigil::elapsed::{ElapsedTime, calculate_elapsed_time};
use vigil::timestamp::UnixTimestamp;

/// Start date of the reference counter, `2023-10-08T23:52:00Z`.
const COUNTER_START: f64 = 1696809120.0;

#[test]
fn start_date_lands_on_the_expected_utc_calendar_date() {
    use chrono::{Datelike, Timelike};

    let date = UnixTimestamp::new(COUNTER_START).unwrap().datetime();
    assert_eq!(
        (date.year(), date.month(), date.day()),
        (2023, 10, 8)
    );
    assert_eq!(
        (date.hour(), date.minute(), date.second()),
        (23, 52, 0)
    );
}

#[test]
fn known_test_points() {
    // (name, end timestamp, years, months, days, hours, minutes, seconds)
    let cases = [
        ("one hour later", COUNTER_START + 3600.0, 0, 0, 0, 1, 0, 0),
        ("one day later", COUNTER_START + 86400.0, 0, 0, 1, 0, 0, 0),
        ("one week later", COUNTER_START + 7.0 * 86400.0, 0, 0, 7, 0, 0, 0),
        // January 1, 2024, 00:00:00 UTC
        ("new year 2024", 1704067200.0, 0, 2, 23, 0, 8, 0),
    ];

    for (name, end, years, months, days, hours, minutes, seconds) in cases {
        let r = calculate_elapsed_time(COUNTER_START, end).unwrap();
        assert_eq!(
            (r.years, r.months, r.days, r.hours, r.minutes, r.seconds),
            (years, months, days, hours, minutes, seconds),
            "wrong breakdown for case: {name}"
        );
    }
}

#[test]
fn counter_and_free_function_agree() {
    let start = UnixTimestamp::new(COUNTER_START).unwrap();
    let end = UnixTimestamp::new(COUNTER_START + 123456.0).unwrap();
    let counter = Counter::new(start);

    assert_eq!(
        counter.elapsed_at(end),
        calculate_elapsed_time(COUNTER_START, COUNTER_START + 123456.0).unwrap()
    );
}

#[test]
fn leap_day_span_counts_every_day() {
    // 2024 is a leap year; the flat totals must include February 29.
    let feb29_noon = 1709208000.0; // 2024-02-29T12:00:00Z
    let r = calculate_elapsed_time(COUNTER_START, feb29_noon).unwrap();
    assert!(r.total_days > 100, "expected several months of days, got {}", r.total_days);
    assert_eq!(r.total_days, ((feb29_noon - COUNTER_START) / 86400.0).floor() as u64);
}

#[test]
fn reading_at_the_start_is_zero() {
    let start = UnixTimestamp::new(COUNTER_START).unwrap();
    assert_eq!(Counter::new(start).elapsed_at(start), ElapsedTime::ZERO);
}

#[test]
fn successive_readings_never_go_backwards() {
    let counter = Counter::new(UnixTimestamp::new(COUNTER_START).unwrap());
    let mut previous = 0;
    for offset in [1.0, 59.0, 60.0, 3599.0, 3600.0, 86399.0, 86400.0, 31536000.0] {
        let end = UnixTimestamp::new(COUNTER_START + offset).unwrap();
        let hours = counter.elapsed_at(end).total_hours;
        assert!(hours >= previous);
        previous = hours;
    }
}
