//! Aggregation of sales line items into report groups
//!
//! Property tests check that group totals always equal Σ quantity × unit
//! price and that no item is lost or duplicated across groups.

use multistock_reports::modules::reports::models::{GroupBy, GroupOrder, UNCATEGORIZED};
use multistock_reports::modules::reports::services::{aggregate, aggregate_by};
use multistock_reports::modules::sales::MAX_UNIT_PRICE;
use multistock_reports::LineItem;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn item(category: Option<&str>, quantity: u32, unit_price: Decimal) -> LineItem {
    let item = LineItem::new("Producto", "SKU-1", quantity, unit_price, None, "order-1");
    match category {
        Some(category) => item.with_category(category),
        None => item,
    }
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (
        prop::option::of(prop::sample::select(vec!["A", "B", "C", "  "])),
        0u32..500,
        0i64..10_000_000,
    )
        .prop_map(|(category, quantity, cents)| {
            item(category, quantity, Decimal::new(cents, 2))
        })
}

/// Backend records with prices anywhere in the `Decimal` range, including
/// values past it
fn arb_backend_item() -> impl Strategy<Value = LineItem> {
    let price = prop_oneof![
        (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2).to_string()),
        any::<u64>().prop_map(|p| p.to_string()),
        Just(Decimal::MAX.to_string()),
        Just("5e28".to_string()),
        Just("1".repeat(40)),
    ];
    (
        prop::sample::select(vec!["A", "B"]),
        any::<u32>(),
        price,
    )
        .prop_map(|(category, quantity, price)| {
            LineItem::from_json(&json!({
                "title": "Producto",
                "quantity": quantity,
                "unit_price": price,
                "category": category,
            }))
        })
}

proptest! {
    /// Extreme backend amounts never panic and still sum exactly
    #[test]
    fn prop_extreme_amounts_sum_exactly(items in prop::collection::vec(arb_backend_item(), 0..60)) {
        for item in &items {
            prop_assert!(item.unit_price <= MAX_UNIT_PRICE);
        }

        let aggregation = aggregate_by(items, GroupBy::Category);
        for group in aggregation.groups() {
            let expected = group
                .items
                .iter()
                .fold(Decimal::ZERO, |sum, i| sum + Decimal::from(i.quantity) * i.unit_price);
            prop_assert_eq!(group.total_amount, expected);
        }
    }

    /// Each group's total equals Σ quantity × unit_price of its items
    #[test]
    fn prop_group_totals_match_items(items in prop::collection::vec(arb_item(), 0..60)) {
        let aggregation = aggregate(items, |i| i.category.clone());

        for group in aggregation.groups() {
            let expected: Decimal = group
                .items
                .iter()
                .map(|i| Decimal::from(i.quantity) * i.unit_price)
                .sum();
            prop_assert_eq!(group.total_amount, expected);

            let quantity: u64 = group.items.iter().map(|i| u64::from(i.quantity)).sum();
            prop_assert_eq!(group.total_quantity, quantity);
        }
    }

    /// Grand totals are independent of how items are grouped
    #[test]
    fn prop_grouping_preserves_items(items in prop::collection::vec(arb_item(), 0..60)) {
        let expected_amount: Decimal = items.iter().map(LineItem::subtotal).sum();
        let expected_count = items.len();

        let totals = aggregate(items, |i| i.category.clone()).totals();

        prop_assert_eq!(totals.total_amount, expected_amount);
        prop_assert_eq!(totals.item_count, expected_count);
    }
}

/// Prices at the `Decimal` limit are clamped instead of overflowing
#[test]
fn test_oversized_prices_do_not_panic() {
    let items = vec![
        LineItem::from_json(&json!({
            "quantity": 2,
            "unit_price": "79228162514264337593543950335",
            "category": "A",
        })),
        LineItem::from_json(&json!({ "quantity": 1, "unit_price": "5e28", "category": "A" })),
        LineItem::from_json(&json!({ "quantity": 1, "unit_price": "5e28", "category": "A" })),
    ];

    let aggregation = aggregate_by(items, GroupBy::Category);
    let a = aggregation.get("A").expect("group A");
    assert_eq!(a.total_amount, MAX_UNIT_PRICE * dec!(4));
    assert_eq!(aggregation.totals().total_amount, MAX_UNIT_PRICE * dec!(4));
}

/// Scenario from the dashboard: two categories, three sales
#[test]
fn test_category_scenario() {
    let items = vec![
        item(Some("A"), 2, dec!(1000)),
        item(Some("A"), 1, dec!(500)),
        item(Some("B"), 3, dec!(200)),
    ];

    let aggregation = aggregate(items, |i| i.category.clone());

    let a = aggregation.get("A").expect("group A");
    assert_eq!(a.total_amount, dec!(2500), "A total amount");
    assert_eq!(a.total_quantity, 3, "A total quantity");

    let b = aggregation.get("B").expect("group B");
    assert_eq!(b.total_amount, dec!(600), "B total amount");
    assert_eq!(b.total_quantity, 3, "B total quantity");
}

/// Empty input yields no groups
#[test]
fn test_empty_input() {
    let aggregation = aggregate(Vec::new(), |i: &LineItem| i.category.clone());
    assert!(aggregation.is_empty());
    assert_eq!(aggregation.totals().total_amount, Decimal::ZERO);
}

/// Items without a category end up in the sentinel group
#[test]
fn test_missing_key_goes_to_sentinel() {
    let items = vec![item(None, 1, dec!(100)), item(Some(""), 2, dec!(50))];

    let aggregation = aggregate(items, |i| i.category.clone());

    assert_eq!(aggregation.len(), 1);
    assert_eq!(
        aggregation.get(UNCATEGORIZED).map(|g| g.total_amount),
        Some(dec!(200))
    );
}

/// Payment-method ranking orders by amount, ties by name
#[test]
fn test_payment_method_ranking() {
    let items = vec![
        item(None, 1, dec!(300)).with_payment_method("credit_card"),
        item(None, 1, dec!(300)).with_payment_method("account_money"),
        item(None, 1, dec!(900)).with_payment_method("debit_card"),
    ];

    let keys: Vec<String> = aggregate_by(items, GroupBy::PaymentMethod)
        .sorted(GroupOrder::AmountDescending)
        .into_iter()
        .map(|g| g.key)
        .collect();

    assert_eq!(keys, vec!["debit_card", "account_money", "credit_card"]);
}
