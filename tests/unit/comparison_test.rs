//! Period-over-period comparison
//!
//! Sign convention: difference = B − A, percentage relative to the
//! baseline A, rounded to one decimal place.

use multistock_reports::compare;
use multistock_reports::modules::reports::models::Trend;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 100 → 150 is a 50% increase
#[test]
fn test_increase() {
    let comparison = compare(dec!(100), dec!(150));
    assert_eq!(comparison.difference, dec!(50));
    assert_eq!(comparison.percentage_change, dec!(50.0));
    assert_eq!(comparison.trend, Trend::Up);
}

/// 200 → 100 is a 50% decrease
#[test]
fn test_decrease() {
    let comparison = compare(dec!(200), dec!(100));
    assert_eq!(comparison.difference, dec!(-100));
    assert_eq!(comparison.percentage_change, dec!(-50.0));
    assert_eq!(comparison.trend, Trend::Down);
}

/// A zero baseline never divides; the percentage is reported as 0
#[test]
fn test_zero_baseline() {
    let comparison = compare(Decimal::ZERO, dec!(12345));
    assert_eq!(comparison.difference, dec!(12345));
    assert_eq!(comparison.percentage_change, Decimal::ZERO);
    assert_eq!(comparison.trend, Trend::Up);

    let both_zero = compare(Decimal::ZERO, Decimal::ZERO);
    assert_eq!(both_zero.trend, Trend::Flat);
}

/// Comparing against zero sales is a full drop
#[test]
fn test_compared_is_zero() {
    let comparison = compare(dec!(450), Decimal::ZERO);
    assert_eq!(comparison.percentage_change, dec!(-100.0));
}

proptest! {
    /// compare never panics and keeps the sign convention
    #[test]
    fn prop_compare_is_total(a in any::<i64>(), b in any::<i64>(), scale in 0u32..6) {
        let a = Decimal::new(a, scale);
        let b = Decimal::new(b, scale);

        let comparison = compare(a, b);

        prop_assert_eq!(comparison.difference, b - a);
        if a.is_zero() {
            prop_assert_eq!(comparison.percentage_change, Decimal::ZERO);
        }
        prop_assert!(comparison.percentage_change.scale() <= 1);
        prop_assert_eq!(comparison.trend == Trend::Up, b > a);
    }
}
