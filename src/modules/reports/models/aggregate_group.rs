use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::sales::LineItem;

/// Group key used for items whose grouping dimension is missing or blank
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Group key used for items without an order date in period reports
pub const UNDATED: &str = "Undated";

/// Line items sharing one key (category, payment method, company, product
/// or period label) with their summed totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub key: String,
    /// Σ quantity × unit_price over `items`
    pub total_amount: Decimal,
    pub total_quantity: u64,
    pub items: Vec<LineItem>,
}

impl AggregateGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            total_amount: Decimal::ZERO,
            total_quantity: 0,
            items: Vec::new(),
        }
    }

    /// Add an item and fold it into the totals; totals saturate instead of
    /// overflowing
    pub fn push(&mut self, item: LineItem) {
        self.total_amount = saturating_sum(self.total_amount, item.subtotal());
        self.total_quantity = self.total_quantity.saturating_add(u64::from(item.quantity));
        self.items.push(item);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Amount per unit sold, zero when nothing was sold
    pub fn average_unit_price(&self) -> Decimal {
        if self.total_quantity == 0 {
            Decimal::ZERO
        } else {
            self.total_amount
                .checked_div(Decimal::from(self.total_quantity))
                .unwrap_or(Decimal::ZERO)
        }
    }

    /// Percentage of `grand_total` this group represents (0 when the total is 0)
    pub fn share_of(&self, grand_total: Decimal) -> Decimal {
        if grand_total.is_zero() {
            return Decimal::ZERO;
        }
        self.total_amount
            .checked_div(grand_total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// Same totals, contributing items dropped
    pub fn without_items(&self) -> Self {
        Self {
            key: self.key.clone(),
            total_amount: self.total_amount,
            total_quantity: self.total_quantity,
            items: Vec::new(),
        }
    }
}

/// Amounts are never negative, so overflow can only go up
pub fn saturating_sum(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Grand totals over a set of groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_amount: Decimal,
    pub total_quantity: u64,
    pub item_count: usize,
    pub group_count: usize,
}

impl ReportTotals {
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a AggregateGroup>) -> Self {
        groups
            .into_iter()
            .fold(ReportTotals::default(), |mut totals, group| {
                totals.total_amount = saturating_sum(totals.total_amount, group.total_amount);
                totals.total_quantity = totals.total_quantity.saturating_add(group.total_quantity);
                totals.item_count += group.item_count();
                totals.group_count += 1;
                totals
            })
    }

    pub fn is_empty(&self) -> bool {
        self.group_count == 0
    }
}
