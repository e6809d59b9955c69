use async_trait::async_trait;

use crate::core::Result;
use crate::modules::reports::models::{PeriodFilter, ReportKind};
use crate::modules::sales::LineItem;

/// Source of raw line items for a report
#[async_trait]
pub trait SalesSource: Send + Sync {
    /// Fetch the line items of `kind` for connection `client_id` within `period`
    async fn fetch_line_items(
        &self,
        client_id: &str,
        kind: ReportKind,
        period: &PeriodFilter,
    ) -> Result<Vec<LineItem>>;

    /// Source name for logs
    fn name(&self) -> &str;
}
