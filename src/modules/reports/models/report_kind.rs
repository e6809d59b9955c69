use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Granularity;
use crate::modules::exports::models::{CellFormat, ColumnSource, ColumnSpec};
use crate::modules::sales::LineItemStatus;

use super::{GroupBy, GroupOrder};

/// The report screens of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    SalesByDay,
    SalesByWeek,
    SalesByMonth,
    SalesByYear,
    PaymentMethods,
    SalesByCategory,
    RefundsByCategory,
    CancelledProducts,
    TopProducts,
    SalesByCompany,
    PeriodComparison,
}

impl ReportKind {
    pub const ALL: [ReportKind; 11] = [
        ReportKind::SalesByDay,
        ReportKind::SalesByWeek,
        ReportKind::SalesByMonth,
        ReportKind::SalesByYear,
        ReportKind::PaymentMethods,
        ReportKind::SalesByCategory,
        ReportKind::RefundsByCategory,
        ReportKind::CancelledProducts,
        ReportKind::TopProducts,
        ReportKind::SalesByCompany,
        ReportKind::PeriodComparison,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::SalesByDay => "sales-by-day",
            ReportKind::SalesByWeek => "sales-by-week",
            ReportKind::SalesByMonth => "sales-by-month",
            ReportKind::SalesByYear => "sales-by-year",
            ReportKind::PaymentMethods => "payment-methods",
            ReportKind::SalesByCategory => "sales-by-category",
            ReportKind::RefundsByCategory => "refunds-by-category",
            ReportKind::CancelledProducts => "cancelled-products",
            ReportKind::TopProducts => "top-products",
            ReportKind::SalesByCompany => "sales-by-company",
            ReportKind::PeriodComparison => "period-comparison",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::SalesByDay => "Daily Sales",
            ReportKind::SalesByWeek => "Weekly Sales",
            ReportKind::SalesByMonth => "Monthly Sales",
            ReportKind::SalesByYear => "Annual Sales",
            ReportKind::PaymentMethods => "Sales by Payment Method",
            ReportKind::SalesByCategory => "Sales by Category",
            ReportKind::RefundsByCategory => "Refunds by Category",
            ReportKind::CancelledProducts => "Cancelled Products (Loss Analysis)",
            ReportKind::TopProducts => "Top Selling Products",
            ReportKind::SalesByCompany => "Sales by Company",
            ReportKind::PeriodComparison => "Period Comparison",
        }
    }

    /// Backend path segment; the connection id is appended as the last segment
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::SalesByDay => "mercadolibre/daily-sales",
            ReportKind::SalesByWeek => "mercadolibre/sales-by-week",
            ReportKind::SalesByMonth | ReportKind::PeriodComparison => {
                "mercadolibre/sales-by-month"
            }
            ReportKind::SalesByYear => "mercadolibre/annual-sales",
            ReportKind::PaymentMethods => "mercadolibre/top-payment-methods",
            ReportKind::SalesByCategory => "mercadolibre/sales-by-category",
            ReportKind::RefundsByCategory => "mercadolibre/refunds-by-category",
            ReportKind::CancelledProducts => "mercadolibre/cancelled-products",
            ReportKind::TopProducts => "mercadolibre/top-selling-products",
            ReportKind::SalesByCompany => "mercadolibre/sales-by-company",
        }
    }

    /// Grouping of the fetched items; `None` for the comparison report,
    /// whose groups are the two compared periods
    pub fn group_by(&self) -> Option<GroupBy> {
        match self {
            ReportKind::SalesByDay => Some(GroupBy::Period(Granularity::Day)),
            ReportKind::SalesByWeek => Some(GroupBy::Period(Granularity::Week)),
            ReportKind::SalesByMonth => Some(GroupBy::Period(Granularity::Month)),
            ReportKind::SalesByYear => Some(GroupBy::Period(Granularity::Year)),
            ReportKind::PaymentMethods => Some(GroupBy::PaymentMethod),
            ReportKind::SalesByCategory | ReportKind::RefundsByCategory => {
                Some(GroupBy::Category)
            }
            ReportKind::CancelledProducts | ReportKind::TopProducts => Some(GroupBy::Product),
            ReportKind::SalesByCompany => Some(GroupBy::Company),
            ReportKind::PeriodComparison => None,
        }
    }

    pub fn order(&self) -> GroupOrder {
        match self {
            ReportKind::SalesByDay
            | ReportKind::SalesByWeek
            | ReportKind::SalesByMonth
            | ReportKind::SalesByYear
            | ReportKind::PeriodComparison => GroupOrder::KeyAscending,
            ReportKind::TopProducts => GroupOrder::QuantityDescending,
            _ => GroupOrder::AmountDescending,
        }
    }

    /// Only items in this state feed the report
    pub fn status_filter(&self) -> LineItemStatus {
        match self {
            ReportKind::RefundsByCategory => LineItemStatus::Refunded,
            ReportKind::CancelledProducts => LineItemStatus::Cancelled,
            _ => LineItemStatus::Sold,
        }
    }

    /// Whether only the first N groups are kept
    pub fn is_ranked(&self) -> bool {
        matches!(self, ReportKind::TopProducts)
    }

    /// Default export columns
    pub fn columns(&self) -> Vec<ColumnSpec> {
        match self {
            ReportKind::SalesByDay => period_columns("Date"),
            ReportKind::SalesByWeek => period_columns("Week"),
            ReportKind::SalesByMonth => period_columns("Month"),
            ReportKind::SalesByYear => period_columns("Year"),
            ReportKind::PaymentMethods => vec![
                ColumnSpec::key("Payment Method"),
                ColumnSpec::new("Orders", ColumnSource::ItemCount, CellFormat::Integer),
                ColumnSpec::amount("Total Sales"),
                ColumnSpec::share("Share"),
            ],
            ReportKind::SalesByCategory => vec![
                ColumnSpec::key("Category"),
                ColumnSpec::quantity("Units Sold"),
                ColumnSpec::amount("Total Sales"),
                ColumnSpec::share("Share"),
            ],
            ReportKind::RefundsByCategory => vec![
                ColumnSpec::key("Category"),
                ColumnSpec::quantity("Units Refunded"),
                ColumnSpec::amount("Refunded Amount"),
                ColumnSpec::share("Share"),
            ],
            ReportKind::CancelledProducts => vec![
                ColumnSpec::key("Product"),
                ColumnSpec::quantity("Units Cancelled"),
                ColumnSpec::amount("Lost Revenue"),
                ColumnSpec::share("Share of Losses"),
            ],
            ReportKind::TopProducts => vec![
                ColumnSpec::key("Product"),
                ColumnSpec::quantity("Units Sold"),
                ColumnSpec::new(
                    "Average Price",
                    ColumnSource::AverageUnitPrice,
                    CellFormat::Currency,
                ),
                ColumnSpec::amount("Total Sales"),
            ],
            ReportKind::SalesByCompany => vec![
                ColumnSpec::key("Company"),
                ColumnSpec::quantity("Units Sold"),
                ColumnSpec::amount("Total Sales"),
                ColumnSpec::share("Share"),
            ],
            ReportKind::PeriodComparison => vec![
                ColumnSpec::key("Period"),
                ColumnSpec::quantity("Units Sold"),
                ColumnSpec::amount("Total Sales"),
            ],
        }
    }
}

fn period_columns(label: &str) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::key(label),
        ColumnSpec::new("Orders", ColumnSource::ItemCount, CellFormat::Integer),
        ColumnSpec::quantity("Units Sold"),
        ColumnSpec::amount("Total Sales"),
    ]
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("Unknown report kind: {}", s))
    }
}
