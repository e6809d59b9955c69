pub mod aggregate_group;
pub mod grouping;
pub mod period_comparison;
pub mod report_kind;
pub mod report_query;
pub mod report_view;

pub use aggregate_group::{saturating_sum, AggregateGroup, ReportTotals, UNCATEGORIZED, UNDATED};
pub use grouping::{GroupBy, GroupOrder};
pub use period_comparison::{Comparison, PeriodComparison, Trend};
pub use report_kind::ReportKind;
pub use report_query::{validate_client_id, PeriodFilter, ReportQuery};
pub use report_view::ReportView;
