use serde::{Deserialize, Serialize};

use crate::core::{bucket_key, Granularity};
use crate::modules::sales::LineItem;

use super::{UNCATEGORIZED, UNDATED};

/// Dimension a report groups its line items by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "by", content = "granularity")]
pub enum GroupBy {
    Category,
    PaymentMethod,
    Company,
    Product,
    Period(Granularity),
}

impl GroupBy {
    /// Group key of `item`, `None` when the dimension is missing
    pub fn key_of(&self, item: &LineItem) -> Option<String> {
        match self {
            GroupBy::Category => item.category.clone(),
            GroupBy::PaymentMethod => item.payment_method.clone(),
            GroupBy::Company => item.company.clone(),
            GroupBy::Product => Some(item.product_title.clone()),
            GroupBy::Period(granularity) => item.order_date.map(|d| bucket_key(d, *granularity)),
        }
    }

    /// Key for items where [`GroupBy::key_of`] yields nothing
    pub fn sentinel(&self) -> &'static str {
        match self {
            GroupBy::Period(_) => UNDATED,
            _ => UNCATEGORIZED,
        }
    }
}

/// Ordering applied to groups before they reach a view or an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    KeyAscending,
    AmountDescending,
    QuantityDescending,
}
