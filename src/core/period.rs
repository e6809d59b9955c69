use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Period size used to bucket line items for time-series reports.
///
/// Calendar is proleptic Gregorian. Weeks follow ISO-8601: they start on
/// Monday and belong to the ISO week-year, so `2024-12-30` is in `2025-W01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err(format!("Invalid granularity: {}", s)),
        }
    }
}

/// Period key for `date` at the given granularity.
///
/// - Day: `YYYY-MM-DD`
/// - Week: `YYYY-Www` (ISO week-year and week number)
/// - Month: `YYYY-MM`
/// - Year: `YYYY`
pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Week => {
            let week = date.iso_week();
            format!("{:04}-W{:02}", week.year(), week.week())
        }
        Granularity::Month => format!("{:04}-{:02}", date.year(), date.month()),
        Granularity::Year => format!("{:04}", date.year()),
    }
}

/// Inclusive first and last day of the bucket containing `date`.
///
/// Buckets cut by the ends of the calendar range are clamped to
/// `NaiveDate::MIN` / `NaiveDate::MAX`.
pub fn period_bounds(date: NaiveDate, granularity: Granularity) -> (NaiveDate, NaiveDate) {
    match granularity {
        Granularity::Day => (date, date),
        Granularity::Week => {
            let offset = Duration::days(i64::from(date.weekday().num_days_from_monday()));
            let start = date.checked_sub_signed(offset).unwrap_or(NaiveDate::MIN);
            let end = start
                .checked_add_signed(Duration::days(6))
                .unwrap_or(NaiveDate::MAX);
            (start, end)
        }
        Granularity::Month => {
            let start = date.with_day(1).unwrap_or(date);
            let next_month = if date.month() == 12 {
                NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
            };
            let end = next_month
                .and_then(|d| d.pred_opt())
                .unwrap_or(date);
            (start, end)
        }
        Granularity::Year => {
            let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
            let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
            (start, end)
        }
    }
}
