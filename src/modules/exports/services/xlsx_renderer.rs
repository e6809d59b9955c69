use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

use crate::core::{Currency, Result};
use crate::modules::exports::models::{CellFormat, CellValue, SheetModel, WorkbookModel};

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 60;

/// Render a workbook model as `.xlsx` bytes.
///
/// Numbers stay numeric in the file; `currency` only drives the number
/// format applied to amount columns.
pub fn render_workbook(model: &WorkbookModel, currency: Currency) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let formats = Formats::new(currency);

    for sheet in &model.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_sheet(worksheet, sheet, &formats)?;
    }

    // An .xlsx needs at least one sheet
    if model.sheets.is_empty() {
        workbook.add_worksheet();
    }

    Ok(workbook.save_to_buffer()?)
}

struct Formats {
    header: Format,
    text: Format,
    currency: Format,
    integer: Format,
    percentage: Format,
}

impl Formats {
    fn new(currency: Currency) -> Self {
        let amount_format = match currency {
            Currency::CLP => "\"$\"#,##0",
            Currency::USD => "\"US$\"#,##0.00",
        };
        Self {
            header: Format::new().set_bold().set_align(FormatAlign::Center),
            text: Format::new(),
            currency: Format::new().set_num_format(amount_format),
            integer: Format::new().set_num_format("#,##0"),
            percentage: Format::new().set_num_format("0.0\"%\""),
        }
    }

    fn for_cell(&self, format: CellFormat) -> &Format {
        match format {
            CellFormat::Text => &self.text,
            CellFormat::Currency => &self.currency,
            CellFormat::Integer => &self.integer,
            CellFormat::Percentage => &self.percentage,
        }
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetModel, formats: &Formats) -> Result<()> {
    for (col, header) in sheet.columns.iter().enumerate() {
        let col = column_index(col);
        worksheet.write_string_with_format(0, col, &header.label, &formats.header)?;
    }

    for (index, row) in sheet.rows.iter().enumerate() {
        let row_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        for (col, cell) in row.iter().enumerate() {
            let format = sheet
                .columns
                .get(col)
                .map(|c| formats.for_cell(c.format))
                .unwrap_or(&formats.text);
            let col = column_index(col);
            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string_with_format(row_number, col, text, format)?;
                }
                CellValue::Number(value) => {
                    let value = value.to_f64().unwrap_or_default();
                    worksheet.write_number_with_format(row_number, col, value, format)?;
                }
                CellValue::Integer(value) => {
                    worksheet.write_number_with_format(row_number, col, *value as f64, format)?;
                }
            }
        }
    }

    for (col, width) in column_widths(sheet).into_iter().enumerate() {
        worksheet.set_column_width(column_index(col), width as f64)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    Ok(())
}

fn column_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

/// Width per column from the longest header or text cell, clamped
fn column_widths(sheet: &SheetModel) -> Vec<usize> {
    sheet
        .columns
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest_cell = sheet
                .rows
                .iter()
                .filter_map(|row| match row.get(col) {
                    Some(CellValue::Text(text)) => Some(text.chars().count()),
                    Some(_) => Some(14),
                    None => None,
                })
                .max()
                .unwrap_or(0);
            (header.label.chars().count().max(longest_cell) + 2)
                .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}
