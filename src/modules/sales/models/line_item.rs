// LineItem model: one sold, refunded or cancelled product record
//
// Backend responses are loosely typed: numbers arrive as JSON numbers or
// numeric strings, field names differ between marketplace endpoints, and any
// field may be missing. `LineItem::from_json` is the single place that maps
// such a record into the typed model. It never fails: missing numbers become
// zero and missing strings become a sentinel.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used when a record carries no product name
pub const UNKNOWN_PRODUCT: &str = "Unknown product";

/// Placeholder for missing SKU and order identifiers
pub const NOT_AVAILABLE: &str = "N/A";

/// Largest unit price accepted from the backend (10^12); larger values are
/// clamped so per-item subtotals stay far from the `Decimal` limit
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

const TITLE_FIELDS: &[&str] = &["product_title", "title", "product", "name"];
const SKU_FIELDS: &[&str] = &["sku", "seller_sku", "product_sku"];
const QUANTITY_FIELDS: &[&str] = &["quantity", "qty", "sold_quantity", "cantidad"];
const UNIT_PRICE_FIELDS: &[&str] = &["unit_price", "price", "precio"];
const TOTAL_FIELDS: &[&str] = &["total_amount", "total"];
const DATE_FIELDS: &[&str] = &["order_date", "date_created", "created_at", "date", "fecha"];
const ORDER_ID_FIELDS: &[&str] = &["order_id", "orderId", "id"];
const CATEGORY_FIELDS: &[&str] = &["category", "category_name", "categoria"];
const PAYMENT_FIELDS: &[&str] = &["payment_method", "payment_type", "payment_method_id"];
const COMPANY_FIELDS: &[&str] = &["company", "company_name", "empresa", "store"];

/// Lifecycle state of the order line as reported by the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineItemStatus {
    #[default]
    Sold,
    Refunded,
    Cancelled,
}

impl LineItemStatus {
    fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "refunded" | "returned" | "refund" | "devolucion" | "devuelto" => {
                LineItemStatus::Refunded
            }
            "cancelled" | "canceled" | "cancelado" => LineItemStatus::Cancelled,
            _ => LineItemStatus::Sold,
        }
    }
}

/// One product line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_title: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// `None` when the backend omitted or mangled the date
    pub order_date: Option<NaiveDate>,
    pub order_id: String,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub status: LineItemStatus,
}

impl LineItem {
    /// Create a sold line item without grouping dimensions
    pub fn new(
        product_title: impl Into<String>,
        sku: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        order_date: Option<NaiveDate>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            product_title: product_title.into(),
            sku: sku.into(),
            quantity,
            unit_price: clamp_price(unit_price),
            order_date,
            order_id: order_id.into(),
            category: None,
            payment_method: None,
            company: None,
            status: LineItemStatus::Sold,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_status(mut self, status: LineItemStatus) -> Self {
        self.status = status;
        self
    }

    /// quantity × unit_price, unrounded; saturates at `Decimal::MAX`
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .unwrap_or(Decimal::MAX)
    }

    /// Map one raw backend record into a line item.
    ///
    /// Non-object values produce an all-default item rather than an error.
    pub fn from_json(raw: &Value) -> Self {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);

        let quantity = decimal_field(obj, QUANTITY_FIELDS)
            .filter(|q| *q > Decimal::ZERO)
            .and_then(|q| q.trunc().to_u32())
            .unwrap_or(0);

        let unit_price = match decimal_field(obj, UNIT_PRICE_FIELDS) {
            Some(price) => price,
            // Some endpoints only report the line total
            None => match decimal_field(obj, TOTAL_FIELDS) {
                Some(total) if quantity > 0 => total
                    .checked_div(Decimal::from(quantity))
                    .unwrap_or(Decimal::ZERO),
                _ => Decimal::ZERO,
            },
        };

        Self {
            product_title: string_field(obj, TITLE_FIELDS)
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            sku: string_field(obj, SKU_FIELDS).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            quantity,
            unit_price: clamp_price(unit_price),
            order_date: date_field(obj, DATE_FIELDS),
            order_id: string_field(obj, ORDER_ID_FIELDS)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            category: string_field(obj, CATEGORY_FIELDS),
            payment_method: string_field(obj, PAYMENT_FIELDS),
            company: string_field(obj, COMPANY_FIELDS),
            status: string_field(obj, &["status"])
                .map(|s| LineItemStatus::from_raw(&s))
                .unwrap_or_default(),
        }
    }
}

fn clamp_price(price: Decimal) -> Decimal {
    price.max(Decimal::ZERO).min(MAX_UNIT_PRICE)
}

fn first_field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| obj.get(*name))
        .find(|v| !v.is_null())
}

fn string_field(obj: &Map<String, Value>, names: &[&str]) -> Option<String> {
    match first_field(obj, names)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        // Nested `{ "name": ... }` objects, e.g. MercadoLibre categories
        Value::Object(inner) => string_field(inner, &["name", "title", "id"]),
        _ => None,
    }
}

fn decimal_field(obj: &Map<String, Value>, names: &[&str]) -> Option<Decimal> {
    match first_field(obj, names)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    }
}

fn date_field(obj: &Map<String, Value>, names: &[&str]) -> Option<NaiveDate> {
    let raw = match first_field(obj, names)? {
        Value::String(s) => s.trim(),
        _ => return None,
    };
    // Covers both `YYYY-MM-DD` and RFC 3339 timestamps
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
