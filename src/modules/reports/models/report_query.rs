use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{period_bounds, AppError, Granularity, Result};

use super::ReportKind;

/// Years a report period may cover
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

const MAX_CLIENT_ID_LEN: usize = 64;

/// Connection ids end up in backend URL paths: ASCII letters, digits, `-`
/// and `_` only
pub fn validate_client_id(client_id: &str) -> Result<()> {
    if client_id.trim().is_empty() {
        return Err(AppError::validation("client_id is required"));
    }
    if client_id.len() > MAX_CLIENT_ID_LEN {
        return Err(AppError::validation(format!(
            "client_id must be at most {} characters",
            MAX_CLIENT_ID_LEN
        )));
    }
    if !client_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::validation(
            "client_id may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}

fn validate_year(field: &str, year: i32) -> Result<()> {
    if YEAR_RANGE.contains(&year) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{} must be between {} and {}, got {}",
            field,
            YEAR_RANGE.start(),
            YEAR_RANGE.end(),
            year
        )))
    }
}

/// Time window filter forwarded to the backend as query parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub week_start_date: Option<NaiveDate>,
    pub week_end_date: Option<NaiveDate>,
}

impl PeriodFilter {
    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            ..Self::default()
        }
    }

    pub fn week(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            week_start_date: Some(start),
            week_end_date: Some(end),
            ..Self::default()
        }
    }

    /// Monday-to-Sunday week containing `date`
    pub fn week_of(date: NaiveDate) -> Self {
        let (start, end) = period_bounds(date, Granularity::Week);
        Self::week(start, end)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(year) = self.year {
            validate_year("year", year)?;
        }
        if let Some(start) = self.week_start_date {
            validate_year("week_start_date year", start.year())?;
        }
        if let Some(end) = self.week_end_date {
            validate_year("week_end_date year", end.year())?;
        }

        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(AppError::validation(format!(
                    "month must be between 1 and 12, got {}",
                    month
                )));
            }
            if self.year.is_none() {
                return Err(AppError::validation("month requires a year"));
            }
        }

        match (self.week_start_date, self.week_end_date) {
            (Some(start), Some(end)) if start > end => Err(AppError::validation(format!(
                "week_start_date ({}) must be before or equal to week_end_date ({})",
                start, end
            ))),
            (Some(_), None) | (None, Some(_)) => Err(AppError::validation(
                "week_start_date and week_end_date must be given together",
            )),
            _ => Ok(()),
        }
    }

    /// Backend query parameters, in a stable order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            pairs.push(("month", format!("{:02}", month)));
        }
        if let Some(start) = self.week_start_date {
            pairs.push(("week_start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.week_end_date {
            pairs.push(("week_end_date", end.format("%Y-%m-%d").to_string()));
        }
        pairs
    }

    /// Human label, e.g. `2024-01`, `2024`, `2024-01-15 to 2024-01-21`
    pub fn label(&self) -> String {
        match (self.year, self.month, self.week_start_date, self.week_end_date) {
            (_, _, Some(start), Some(end)) => format!(
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            (Some(year), Some(month), _, _) => format!("{:04}-{:02}", year, month),
            (Some(year), None, _, _) => format!("{:04}", year),
            _ => "All time".to_string(),
        }
    }
}

/// Everything that identifies one fetch of one report view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Marketplace connection the report runs against
    pub client_id: String,
    pub kind: ReportKind,
    pub period: PeriodFilter,
    /// Period B of a comparison; `period` is the baseline A
    pub compare_to: Option<PeriodFilter>,
}

impl ReportQuery {
    pub fn new(client_id: impl Into<String>, kind: ReportKind, period: PeriodFilter) -> Self {
        Self {
            client_id: client_id.into(),
            kind,
            period,
            compare_to: None,
        }
    }

    pub fn comparison(
        client_id: impl Into<String>,
        baseline: PeriodFilter,
        compared: PeriodFilter,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            kind: ReportKind::PeriodComparison,
            period: baseline,
            compare_to: Some(compared),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_client_id(&self.client_id)?;

        self.period.validate()?;

        match (&self.compare_to, self.kind) {
            (Some(compared), ReportKind::PeriodComparison) => {
                compared.validate()?;
                if self.period.year.is_none() || compared.year.is_none() {
                    return Err(AppError::validation(
                        "both compared periods need a year",
                    ));
                }
                Ok(())
            }
            (None, ReportKind::PeriodComparison) => Err(AppError::validation(
                "period-comparison needs a second period",
            )),
            (Some(_), kind) => Err(AppError::validation(format!(
                "a second period is only valid for period-comparison, not {}",
                kind
            ))),
            (None, _) => Ok(()),
        }
    }
}
