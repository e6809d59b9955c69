use rust_decimal::{Decimal, RoundingStrategy};

use crate::modules::reports::models::{AggregateGroup, Comparison, PeriodComparison, Trend};

/// Compare baseline `a` with `b`.
///
/// `difference = b - a`; `percentage_change = (b - a) / a × 100` rounded to
/// one decimal place, or 0 when `a` is 0. Never panics, including on
/// negative inputs and values near the decimal range limits.
pub fn compare(a: Decimal, b: Decimal) -> Comparison {
    let difference = b
        .checked_sub(a)
        .unwrap_or(if b > a { Decimal::MAX } else { Decimal::MIN });

    let percentage_change = if a.is_zero() {
        Decimal::ZERO
    } else {
        difference
            .checked_div(a)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
            .unwrap_or(Decimal::ZERO)
    };

    Comparison {
        difference,
        percentage_change,
        trend: Trend::of(difference),
    }
}

/// Full comparison of baseline period `a` against period `b`
pub fn compare_groups(a: &AggregateGroup, b: &AggregateGroup) -> PeriodComparison {
    let Comparison {
        difference,
        percentage_change,
        trend,
    } = compare(a.total_amount, b.total_amount);

    let quantity_difference = i64::try_from(b.total_quantity)
        .unwrap_or(i64::MAX)
        .saturating_sub(i64::try_from(a.total_quantity).unwrap_or(i64::MAX));

    PeriodComparison {
        period_a: a.without_items(),
        period_b: b.without_items(),
        difference,
        percentage_change,
        trend,
        quantity_difference,
    }
}
