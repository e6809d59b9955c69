pub mod aggregator;
pub mod comparison;
pub mod report_service;
pub mod view_controller;
pub mod view_registry;

pub use aggregator::{aggregate, aggregate_by, aggregate_with_sentinel, Aggregation};
pub use comparison::{compare, compare_groups};
pub use report_service::{ReportData, ReportService};
pub use view_controller::{
    Completion, ControllerSnapshot, FetchState, ReportViewController, RequestToken,
};
pub use view_registry::ReportViews;
