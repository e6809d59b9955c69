use std::cmp::Reverse;
use std::collections::HashMap;

use crate::modules::reports::models::{
    AggregateGroup, GroupBy, GroupOrder, ReportTotals, UNCATEGORIZED,
};
use crate::modules::sales::LineItem;

/// Result of one aggregation pass: group key → group.
///
/// Iteration order is unspecified; use [`Aggregation::sorted`] to get a
/// deterministic sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    groups: HashMap<String, AggregateGroup>,
}

impl Aggregation {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AggregateGroup> {
        self.groups.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn groups(&self) -> impl Iterator<Item = &AggregateGroup> {
        self.groups.values()
    }

    pub fn totals(&self) -> ReportTotals {
        ReportTotals::from_groups(self.groups.values())
    }

    pub fn into_map(self) -> HashMap<String, AggregateGroup> {
        self.groups
    }

    /// Groups ordered by `order`; ties fall back to key ascending
    pub fn sorted(self, order: GroupOrder) -> Vec<AggregateGroup> {
        let mut groups: Vec<AggregateGroup> = self.groups.into_values().collect();
        match order {
            GroupOrder::KeyAscending => groups.sort_by(|a, b| a.key.cmp(&b.key)),
            GroupOrder::AmountDescending => {
                groups.sort_by(|a, b| {
                    b.total_amount
                        .cmp(&a.total_amount)
                        .then_with(|| a.key.cmp(&b.key))
                });
            }
            GroupOrder::QuantityDescending => {
                groups.sort_by_key(|g| (Reverse(g.total_quantity), g.key.clone()));
            }
        }
        groups
    }

    /// The first `n` groups under `order`
    pub fn top(self, n: usize, order: GroupOrder) -> Vec<AggregateGroup> {
        let mut groups = self.sorted(order);
        groups.truncate(n);
        groups
    }
}

/// Group `items` by `key_of`, summing amount and quantity per key.
///
/// Items whose key is `None` or blank land in the [`UNCATEGORIZED`] group.
/// An empty input yields an empty aggregation.
pub fn aggregate<I, F>(items: I, key_of: F) -> Aggregation
where
    I: IntoIterator<Item = LineItem>,
    F: Fn(&LineItem) -> Option<String>,
{
    aggregate_with_sentinel(items, key_of, UNCATEGORIZED)
}

/// [`aggregate`] with an explicit group key for missing keys
pub fn aggregate_with_sentinel<I, F>(items: I, key_of: F, sentinel: &str) -> Aggregation
where
    I: IntoIterator<Item = LineItem>,
    F: Fn(&LineItem) -> Option<String>,
{
    let mut groups: HashMap<String, AggregateGroup> = HashMap::new();

    for item in items {
        let key = key_of(&item)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| sentinel.to_string());

        groups
            .entry(key)
            .or_insert_with_key(|k| AggregateGroup::new(k.clone()))
            .push(item);
    }

    Aggregation { groups }
}

/// Aggregate using one of the preset dimensions and its sentinel
pub fn aggregate_by<I>(items: I, group_by: GroupBy) -> Aggregation
where
    I: IntoIterator<Item = LineItem>,
{
    aggregate_with_sentinel(items, |item| group_by.key_of(item), group_by.sentinel())
}
