//! Lenient parsing of backend responses into line items

use chrono::NaiveDate;
use multistock_reports::modules::backend::models::{extract_records, ApiEnvelope};
use multistock_reports::modules::sales::{LineItemStatus, NOT_AVAILABLE, UNKNOWN_PRODUCT};
use multistock_reports::{AppError, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

/// Numbers may arrive as strings; backend field aliases are accepted
#[test]
fn test_aliases_and_numeric_strings() {
    let item = LineItem::from_json(&json!({
        "title": "Audífonos Bluetooth",
        "seller_sku": "AUD-01",
        "quantity": "2",
        "price": "15990",
        "date_created": "2024-03-05T14:22:10.000-04:00",
        "payment_type": "credit_card",
        "category": { "id": "MLC1000", "name": "Electrónica" },
        "status": "paid"
    }));

    assert_eq!(item.product_title, "Audífonos Bluetooth");
    assert_eq!(item.sku, "AUD-01");
    assert_eq!(item.quantity, 2);
    assert_eq!(item.unit_price, dec!(15990));
    assert_eq!(item.order_date, NaiveDate::from_ymd_opt(2024, 3, 5));
    assert_eq!(item.payment_method.as_deref(), Some("credit_card"));
    assert_eq!(item.category.as_deref(), Some("Electrónica"));
    assert_eq!(item.status, LineItemStatus::Sold);
    assert_eq!(item.subtotal(), dec!(31980));
}

/// Missing or invalid fields fall back to defaults instead of failing
#[test]
fn test_missing_fields_default() {
    let item = LineItem::from_json(&json!({ "quantity": "many", "unit_price": -10 }));

    assert_eq!(item.product_title, UNKNOWN_PRODUCT);
    assert_eq!(item.sku, NOT_AVAILABLE);
    assert_eq!(item.order_id, NOT_AVAILABLE);
    assert_eq!(item.quantity, 0);
    assert_eq!(item.unit_price, Decimal::ZERO);
    assert!(item.order_date.is_none());
    assert!(item.category.is_none());
}

#[test]
fn test_non_object_record() {
    let item = LineItem::from_json(&json!(42));
    assert_eq!(item.product_title, UNKNOWN_PRODUCT);
    assert_eq!(item.subtotal(), Decimal::ZERO);
}

#[test]
fn test_refund_and_cancel_status() {
    let refunded = LineItem::from_json(&json!({ "status": "Refunded" }));
    let cancelled = LineItem::from_json(&json!({ "status": "canceled" }));
    assert_eq!(refunded.status, LineItemStatus::Refunded);
    assert_eq!(cancelled.status, LineItemStatus::Cancelled);
}

/// An `error` envelope surfaces the backend message
#[test]
fn test_error_envelope() {
    let envelope = ApiEnvelope::from_body(json!({
        "status": "error",
        "message": "Token expirado"
    }));

    match envelope.into_data() {
        Err(AppError::Backend(message)) => assert_eq!(message, "Token expirado"),
        other => panic!("expected backend error, got {:?}", other),
    }
}

/// `data` may be an array or an object of arrays
#[test]
fn test_record_shapes() {
    let array = ApiEnvelope::from_body(json!({ "status": "success", "data": [{}, {}] }))
        .into_data()
        .unwrap();
    assert_eq!(extract_records(array).len(), 2);

    let grouped = json!({ "2024-01": [{}, {}], "2024-02": [{}], "total": 3 });
    assert_eq!(extract_records(grouped).len(), 3);

    let missing = ApiEnvelope::from_body(json!({ "status": "success" }))
        .into_data()
        .unwrap();
    assert!(extract_records(missing).is_empty());
}
