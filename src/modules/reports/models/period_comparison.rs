use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AggregateGroup;

/// Direction of a period-over-period change, used by callers to colour values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(difference: Decimal) -> Self {
        if difference > Decimal::ZERO {
            Trend::Up
        } else if difference < Decimal::ZERO {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// Difference between a baseline total `a` and a compared total `b`.
///
/// Sign convention for every report: `difference = b - a`, so a positive
/// value means period B sold more than the baseline period A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub difference: Decimal,
    /// ((b - a) / a) × 100 rounded to one decimal; 0 when `a` is 0
    pub percentage_change: Decimal,
    pub trend: Trend,
}

/// Totals of two periods and how they compare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// Baseline period snapshot (items dropped)
    pub period_a: AggregateGroup,
    /// Compared period snapshot (items dropped)
    pub period_b: AggregateGroup,
    pub difference: Decimal,
    pub percentage_change: Decimal,
    pub trend: Trend,
    /// total_quantity of B minus that of A
    pub quantity_difference: i64,
}
