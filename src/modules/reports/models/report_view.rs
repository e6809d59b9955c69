use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AggregateGroup, PeriodComparison, ReportKind, ReportQuery, ReportTotals};

/// Derived view-model of one report screen, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub kind: ReportKind,
    pub title: String,
    /// Query that produced this view; `None` for the initial empty view
    pub query: Option<ReportQuery>,
    pub groups: Vec<AggregateGroup>,
    pub totals: ReportTotals,
    pub comparison: Option<PeriodComparison>,
    pub generated_at: DateTime<Utc>,
}

impl ReportView {
    pub fn empty(kind: ReportKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            query: None,
            groups: Vec::new(),
            totals: ReportTotals::default(),
            comparison: None,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Connection and period line shown under the title of exports
    pub fn subtitle(&self) -> Option<String> {
        let query = self.query.as_ref()?;
        let period = match &query.compare_to {
            Some(compared) => format!("{} vs {}", query.period.label(), compared.label()),
            None => query.period.label(),
        };
        Some(format!("Connection {} | {}", query.client_id, period))
    }
}
