//! Multi Stock Sync reporting service
//!
//! Fetches marketplace sales line items from the Multi Stock Sync backend,
//! aggregates them into report groups (by period, category, payment method,
//! company or product), compares periods and exports the result as `.xlsx`
//! or `.pdf`. The pipeline is usable as a library; `main.rs` serves it over
//! HTTP with actix-web.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{AppError, Currency, Granularity, Result};
pub use modules::backend::{BackendClient, SalesSource};
pub use modules::exports::{ExportArtifact, ExportFormat, ReportExporter};
pub use modules::reports::services::{aggregate, aggregate_by, compare, compare_groups};
pub use modules::reports::{ReportKind, ReportQuery, ReportService, ReportView, ReportViews};
pub use modules::sales::LineItem;
pub use modules::session::SessionService;
