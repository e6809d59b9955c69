use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::core::{Currency, Result};
use crate::modules::exports::models::{
    CellFormat, CellValue, ColumnHeader, ColumnSource, ColumnSpec, DocumentModel, DocumentPage,
    ExportArtifact, ExportFormat, SheetModel, WorkbookModel,
};
use crate::modules::reports::models::{
    saturating_sum, AggregateGroup, GroupBy, GroupOrder, ReportKind, ReportTotals, ReportView,
};
use crate::modules::reports::services::aggregator::aggregate_by;

use super::{pdf_renderer, xlsx_renderer};

const DEFAULT_SHEET: &str = "Report";
const MAX_SHEET_NAME: usize = 31;

/// Turns aggregate groups into workbook and document models, driven by a
/// list of [`ColumnSpec`]s. Row order always equals the order of the groups
/// passed in.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    currency: Currency,
    rows_per_page: usize,
    footer: Option<String>,
}

impl ReportExporter {
    pub fn new(currency: Currency, rows_per_page: usize, footer: Option<String>) -> Self {
        Self {
            currency,
            rows_per_page: rows_per_page.max(1),
            footer,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Single-sheet workbook; empty `groups` gives a header-only sheet
    pub fn to_workbook(&self, groups: &[AggregateGroup], columns: &[ColumnSpec]) -> WorkbookModel {
        WorkbookModel {
            sheets: vec![self.build_sheet(DEFAULT_SHEET, groups, columns)],
        }
    }

    /// One sheet per section, e.g. one per company
    pub fn to_workbook_sheets(
        &self,
        sections: &[(String, Vec<AggregateGroup>)],
        columns: &[ColumnSpec],
    ) -> WorkbookModel {
        let mut used = HashSet::new();
        let sheets = sections
            .iter()
            .enumerate()
            .map(|(index, (name, groups))| {
                let name = unique_sheet_name(name, index, &mut used);
                self.build_sheet(&name, groups, columns)
            })
            .collect();
        WorkbookModel { sheets }
    }

    pub fn build_sheet(
        &self,
        name: &str,
        groups: &[AggregateGroup],
        columns: &[ColumnSpec],
    ) -> SheetModel {
        let grand_total = grand_total(groups);
        SheetModel {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|c| ColumnHeader {
                    label: c.header.clone(),
                    format: c.format,
                })
                .collect(),
            rows: groups
                .iter()
                .map(|group| columns.iter().map(|c| c.extract(group, grand_total)).collect())
                .collect(),
        }
    }

    /// Paginated document with display strings; empty `groups` gives a
    /// single page without rows
    pub fn to_document(
        &self,
        groups: &[AggregateGroup],
        columns: &[ColumnSpec],
        title: &str,
    ) -> DocumentModel {
        let grand_total = grand_total(groups);
        let rows: Vec<Vec<String>> = groups
            .iter()
            .map(|group| self.display_row(group, columns, grand_total))
            .collect();

        let mut pages: Vec<DocumentPage> = rows
            .chunks(self.rows_per_page)
            .enumerate()
            .map(|(index, chunk)| DocumentPage {
                number: index + 1,
                rows: chunk.to_vec(),
            })
            .collect();
        if pages.is_empty() {
            pages.push(DocumentPage {
                number: 1,
                rows: Vec::new(),
            });
        }

        let totals_row = if groups.is_empty() {
            None
        } else {
            Some(self.totals_row(groups, columns))
        };

        DocumentModel {
            title: title.to_string(),
            subtitle: None,
            generated_at: Utc::now(),
            headers: columns.iter().map(|c| c.header.clone()).collect(),
            pages,
            totals_row,
            footer: self.footer.clone(),
        }
    }

    /// Render the current view of a report into a downloadable file
    pub fn export_view(&self, view: &ReportView, format: ExportFormat) -> Result<ExportArtifact> {
        let columns = view.kind.columns();

        if view.is_empty() {
            warn!(kind = %view.kind, "Exporting an empty report");
        }

        let bytes = match format {
            ExportFormat::Xlsx => {
                let workbook = self.view_workbook(view, &columns);
                xlsx_renderer::render_workbook(&workbook, self.currency)?
            }
            ExportFormat::Pdf => {
                let mut document = self.to_document(&view.groups, &columns, &view.title);
                document.subtitle = self.view_subtitle(view);
                // Summing two compared periods is meaningless
                if view.kind == ReportKind::PeriodComparison {
                    document.totals_row = None;
                }
                pdf_renderer::render_document(&document)?
            }
        };

        let artifact = ExportArtifact {
            file_name: file_name(view, format),
            format,
            bytes,
        };

        info!(
            kind = %view.kind,
            format = format.extension(),
            rows = view.groups.len(),
            size = artifact.bytes.len(),
            "Report exported"
        );

        Ok(artifact)
    }

    fn view_workbook(&self, view: &ReportView, columns: &[ColumnSpec]) -> WorkbookModel {
        let mut workbook = self.to_workbook(&view.groups, columns);
        if let Some(sheet) = workbook.sheets.first_mut() {
            sheet.name = sanitize_sheet_name(view.kind.title(), 0);
        }

        match view.kind {
            // Per-company detail: each company's items broken down by product
            ReportKind::SalesByCompany => {
                let sections: Vec<(String, Vec<AggregateGroup>)> = view
                    .groups
                    .iter()
                    .map(|company| {
                        let products = aggregate_by(company.items.clone(), GroupBy::Product)
                            .sorted(GroupOrder::AmountDescending);
                        (company.key.clone(), products)
                    })
                    .collect();
                let product_columns = ReportKind::TopProducts.columns();
                let detail = self.to_workbook_sheets(&sections, &product_columns);
                let mut used: HashSet<String> =
                    workbook.sheets.iter().map(|s| s.name.to_lowercase()).collect();
                for mut sheet in detail.sheets {
                    sheet.name = unique_sheet_name(&sheet.name, used.len(), &mut used);
                    workbook.sheets.push(sheet);
                }
            }
            ReportKind::PeriodComparison => {
                if let Some(comparison) = &view.comparison {
                    workbook.sheets.push(SheetModel {
                        name: "Comparison".to_string(),
                        columns: vec![
                            ColumnHeader {
                                label: "Baseline".to_string(),
                                format: CellFormat::Text,
                            },
                            ColumnHeader {
                                label: "Compared".to_string(),
                                format: CellFormat::Text,
                            },
                            ColumnHeader {
                                label: "Difference".to_string(),
                                format: CellFormat::Currency,
                            },
                            ColumnHeader {
                                label: "Change".to_string(),
                                format: CellFormat::Percentage,
                            },
                        ],
                        rows: vec![vec![
                            CellValue::Text(comparison.period_a.key.clone()),
                            CellValue::Text(comparison.period_b.key.clone()),
                            CellValue::Number(comparison.difference),
                            CellValue::Number(comparison.percentage_change),
                        ]],
                    });
                }
            }
            _ => {}
        }

        workbook
    }

    fn view_subtitle(&self, view: &ReportView) -> Option<String> {
        let base = view.subtitle();
        match (&view.comparison, base) {
            (Some(c), Some(base)) => Some(format!(
                "{} | Difference {} ({})",
                base,
                self.currency.format_amount(c.difference),
                self.currency.format_percentage(c.percentage_change)
            )),
            (_, base) => base,
        }
    }

    fn display_row(
        &self,
        group: &AggregateGroup,
        columns: &[ColumnSpec],
        grand_total: Decimal,
    ) -> Vec<String> {
        columns
            .iter()
            .map(|c| c.extract(group, grand_total).display(c.format, self.currency))
            .collect()
    }

    fn totals_row(&self, groups: &[AggregateGroup], columns: &[ColumnSpec]) -> Vec<String> {
        let totals = ReportTotals::from_groups(groups);
        columns
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let value = match c.source {
                    ColumnSource::Key if index == 0 => CellValue::Text("Total".to_string()),
                    ColumnSource::Key => CellValue::Text(String::new()),
                    ColumnSource::TotalAmount => CellValue::Number(totals.total_amount),
                    ColumnSource::TotalQuantity => {
                        CellValue::Integer(i64::try_from(totals.total_quantity).unwrap_or(i64::MAX))
                    }
                    ColumnSource::ItemCount => {
                        CellValue::Integer(i64::try_from(totals.item_count).unwrap_or(i64::MAX))
                    }
                    ColumnSource::AverageUnitPrice if totals.total_quantity > 0 => {
                        CellValue::Number(totals.total_amount / Decimal::from(totals.total_quantity))
                    }
                    ColumnSource::AverageUnitPrice => CellValue::Number(Decimal::ZERO),
                    ColumnSource::ShareOfAmount if totals.total_amount.is_zero() => {
                        CellValue::Number(Decimal::ZERO)
                    }
                    ColumnSource::ShareOfAmount => CellValue::Number(Decimal::ONE_HUNDRED),
                };
                value.display(c.format, self.currency)
            })
            .collect()
    }
}

fn grand_total(groups: &[AggregateGroup]) -> Decimal {
    groups
        .iter()
        .fold(Decimal::ZERO, |total, g| saturating_sum(total, g.total_amount))
}

/// Excel sheet names: at most 31 chars, none of `[]:*?/\`
fn sanitize_sheet_name(raw: &str, index: usize) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        format!("Sheet{}", index + 1)
    } else {
        cleaned
    }
}

fn unique_sheet_name(raw: &str, index: usize, used: &mut HashSet<String>) -> String {
    let base = sanitize_sheet_name(raw, index);
    let mut candidate = base.clone();
    let mut n = 2;
    // Excel compares sheet names case-insensitively
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({})", n);
        let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
        candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}

fn file_name(view: &ReportView, format: ExportFormat) -> String {
    let mut parts = vec![view.kind.slug().to_string()];
    if let Some(query) = &view.query {
        parts.push(query.client_id.clone());
        parts.push(query.period.label());
        if let Some(compared) = &query.compare_to {
            parts.push(compared.label());
        }
    }
    let stem: String = parts
        .join("-")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}.{}", stem, format.extension())
}
