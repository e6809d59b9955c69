use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;
use crate::modules::reports::models::AggregateGroup;

/// Where a column takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// The group key (category, period label, ...)
    Key,
    TotalAmount,
    TotalQuantity,
    ItemCount,
    AverageUnitPrice,
    /// Percentage of the grand total amount across all exported groups
    ShareOfAmount,
}

/// How a cell is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
    Text,
    Currency,
    Integer,
    Percentage,
}

/// Typed cell value, kept typed so spreadsheets get real numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
    Integer(i64),
}

impl CellValue {
    /// Display string under the given format and currency conventions
    pub fn display(&self, format: CellFormat, currency: Currency) -> String {
        match (self, format) {
            (CellValue::Text(s), _) => s.clone(),
            (CellValue::Number(n), CellFormat::Currency) => currency.format_amount(*n),
            (CellValue::Number(n), CellFormat::Percentage) => currency.format_percentage(*n),
            (CellValue::Number(n), CellFormat::Integer) => {
                currency.format_integer(n.trunc().to_i64().unwrap_or(i64::MAX))
            }
            (CellValue::Number(n), CellFormat::Text) => n.normalize().to_string(),
            (CellValue::Integer(i), CellFormat::Currency) => {
                currency.format_amount(Decimal::from(*i))
            }
            (CellValue::Integer(i), CellFormat::Percentage) => {
                currency.format_percentage(Decimal::from(*i))
            }
            (CellValue::Integer(i), CellFormat::Integer) => currency.format_integer(*i),
            (CellValue::Integer(i), CellFormat::Text) => i.to_string(),
        }
    }
}

/// One output column of an export: header, value source and formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub header: String,
    pub source: ColumnSource,
    pub format: CellFormat,
}

impl ColumnSpec {
    pub fn new(header: impl Into<String>, source: ColumnSource, format: CellFormat) -> Self {
        Self {
            header: header.into(),
            source,
            format,
        }
    }

    pub fn key(header: impl Into<String>) -> Self {
        Self::new(header, ColumnSource::Key, CellFormat::Text)
    }

    pub fn amount(header: impl Into<String>) -> Self {
        Self::new(header, ColumnSource::TotalAmount, CellFormat::Currency)
    }

    pub fn quantity(header: impl Into<String>) -> Self {
        Self::new(header, ColumnSource::TotalQuantity, CellFormat::Integer)
    }

    pub fn share(header: impl Into<String>) -> Self {
        Self::new(header, ColumnSource::ShareOfAmount, CellFormat::Percentage)
    }

    /// Value of this column for `group`; `grand_total` feeds share columns
    pub fn extract(&self, group: &AggregateGroup, grand_total: Decimal) -> CellValue {
        match self.source {
            ColumnSource::Key => CellValue::Text(group.key.clone()),
            ColumnSource::TotalAmount => CellValue::Number(group.total_amount),
            ColumnSource::TotalQuantity => {
                CellValue::Integer(i64::try_from(group.total_quantity).unwrap_or(i64::MAX))
            }
            ColumnSource::ItemCount => {
                CellValue::Integer(i64::try_from(group.item_count()).unwrap_or(i64::MAX))
            }
            ColumnSource::AverageUnitPrice => CellValue::Number(group.average_unit_price()),
            ColumnSource::ShareOfAmount => CellValue::Number(group.share_of(grand_total)),
        }
    }
}
