//! Period keys and bounds for time-series reports

use chrono::NaiveDate;
use multistock_reports::core::{bucket_key, period_bounds, Granularity};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Two dates of the same month share the month key but not the day key
#[test]
fn test_same_month_different_days() {
    let first = date(2024, 1, 15);
    let second = date(2024, 1, 31);

    assert_eq!(bucket_key(first, Granularity::Month), "2024-01");
    assert_eq!(bucket_key(second, Granularity::Month), "2024-01");
    assert_ne!(
        bucket_key(first, Granularity::Day),
        bucket_key(second, Granularity::Day)
    );
}

/// ISO weeks belong to their ISO week-year
#[test]
fn test_iso_week_keys() {
    assert_eq!(bucket_key(date(2024, 1, 15), Granularity::Week), "2024-W03");
    assert_eq!(bucket_key(date(2024, 12, 30), Granularity::Week), "2025-W01");
    assert_eq!(bucket_key(date(2021, 1, 3), Granularity::Week), "2020-W53");
}

#[test]
fn test_year_key() {
    assert_eq!(bucket_key(date(2023, 7, 4), Granularity::Year), "2023");
}

/// Keys sort chronologically as plain strings
#[test]
fn test_keys_sort_chronologically() {
    let mut keys = vec![
        bucket_key(date(2024, 11, 2), Granularity::Month),
        bucket_key(date(2023, 12, 31), Granularity::Month),
        bucket_key(date(2024, 2, 29), Granularity::Month),
    ];
    keys.sort();
    assert_eq!(keys, vec!["2023-12", "2024-02", "2024-11"]);
}

/// Bounds are inclusive and contain the date
#[test]
fn test_period_bounds() {
    assert_eq!(
        period_bounds(date(2024, 1, 17), Granularity::Week),
        (date(2024, 1, 15), date(2024, 1, 21))
    );
    assert_eq!(
        period_bounds(date(2024, 2, 10), Granularity::Month),
        (date(2024, 2, 1), date(2024, 2, 29))
    );
    assert_eq!(
        period_bounds(date(2024, 12, 5), Granularity::Month),
        (date(2024, 12, 1), date(2024, 12, 31))
    );
    assert_eq!(
        period_bounds(date(2023, 6, 1), Granularity::Year),
        (date(2023, 1, 1), date(2023, 12, 31))
    );
}
