use chrono::Utc;
use futures_util::future::try_join;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::StoreMapping;
use crate::core::Result;
use crate::modules::backend::SalesSource;
use crate::modules::reports::models::{
    AggregateGroup, ReportKind, ReportQuery, ReportTotals, ReportView,
};
use crate::modules::sales::LineItem;

use super::aggregator::aggregate_by;
use super::comparison::compare_groups;

/// Raw line items fetched for one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportData {
    pub primary: Vec<LineItem>,
    /// Items of the compared period B, for period comparisons only
    pub comparison: Option<Vec<LineItem>>,
}

/// Fetches line items for a report query and derives its view.
///
/// Fetching is the only async step; [`ReportService::build_view`] is pure
/// so the same data always yields the same groups and totals.
pub struct ReportService {
    source: Arc<dyn SalesSource>,
    store_mapping: Arc<StoreMapping>,
    top_limit: usize,
}

impl ReportService {
    pub fn new(
        source: Arc<dyn SalesSource>,
        store_mapping: Arc<StoreMapping>,
        top_limit: usize,
    ) -> Self {
        Self {
            source,
            store_mapping,
            top_limit,
        }
    }

    pub fn store_mapping(&self) -> &StoreMapping {
        &self.store_mapping
    }

    /// Fetch the items behind `query`; both periods of a comparison are
    /// requested concurrently
    pub async fn fetch(&self, query: &ReportQuery) -> Result<ReportData> {
        query.validate()?;

        info!(
            source = self.source.name(),
            kind = %query.kind,
            client_id = %query.client_id,
            period = %query.period.label(),
            "Fetching report data"
        );

        match &query.compare_to {
            Some(compared) => {
                let (primary, comparison) = try_join(
                    self.source
                        .fetch_line_items(&query.client_id, query.kind, &query.period),
                    self.source
                        .fetch_line_items(&query.client_id, query.kind, compared),
                )
                .await?;
                Ok(ReportData {
                    primary,
                    comparison: Some(comparison),
                })
            }
            None => {
                let primary = self
                    .source
                    .fetch_line_items(&query.client_id, query.kind, &query.period)
                    .await?;
                Ok(ReportData {
                    primary,
                    comparison: None,
                })
            }
        }
    }

    /// Fetch and build in one step
    pub async fn generate(&self, query: &ReportQuery) -> Result<ReportView> {
        let data = self.fetch(query).await?;
        Ok(self.build_view(query, data))
    }

    /// Derive the view of `query` from already fetched items
    pub fn build_view(&self, query: &ReportQuery, data: ReportData) -> ReportView {
        let kind = query.kind;
        let primary = self.prepare(&query.client_id, kind, data.primary);

        let (groups, comparison) = match (kind, data.comparison) {
            (ReportKind::PeriodComparison, Some(compared)) => {
                let compared = self.prepare(&query.client_id, kind, compared);
                let mut a = AggregateGroup::new(query.period.label());
                primary.into_iter().for_each(|item| a.push(item));
                let b_label = query
                    .compare_to
                    .as_ref()
                    .map(|p| p.label())
                    .unwrap_or_default();
                let mut b = AggregateGroup::new(b_label);
                compared.into_iter().for_each(|item| b.push(item));

                let comparison = compare_groups(&a, &b);
                (vec![a, b], Some(comparison))
            }
            _ => {
                let groups = match kind.group_by() {
                    Some(group_by) => {
                        let aggregation = aggregate_by(primary, group_by);
                        if kind.is_ranked() {
                            aggregation.top(self.top_limit, kind.order())
                        } else {
                            aggregation.sorted(kind.order())
                        }
                    }
                    None => Vec::new(),
                };
                (groups, None)
            }
        };

        let totals = ReportTotals::from_groups(&groups);
        if groups.is_empty() {
            warn!(kind = %kind, client_id = %query.client_id, "Report has no data");
        } else {
            info!(
                kind = %kind,
                groups = totals.group_count,
                items = totals.item_count,
                total = %totals.total_amount,
                "Report built"
            );
        }

        ReportView {
            kind,
            title: kind.title().to_string(),
            query: Some(query.clone()),
            groups,
            totals,
            comparison,
            generated_at: Utc::now(),
        }
    }

    /// Keep the items whose status the report counts, filling in the
    /// connection's company when the backend left it out
    fn prepare(&self, client_id: &str, kind: ReportKind, items: Vec<LineItem>) -> Vec<LineItem> {
        let wanted = kind.status_filter();
        let fallback_company = self.store_mapping.company_for(client_id);

        items
            .into_iter()
            .filter(|item| item.status == wanted)
            .map(|mut item| {
                if item.company.is_none() {
                    item.company = fallback_company.map(str::to_string);
                }
                item
            })
            .collect()
    }
}
