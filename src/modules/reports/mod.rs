pub mod controllers;
pub mod models;
pub mod services;

pub use models::{AggregateGroup, PeriodFilter, ReportKind, ReportQuery, ReportView};
pub use services::{ReportService, ReportViewController, ReportViews};
