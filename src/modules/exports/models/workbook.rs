use serde::{Deserialize, Serialize};

use super::{CellFormat, CellValue};

/// Header cell of a sheet column, with the format its values render in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub label: String,
    pub format: CellFormat,
}

/// One worksheet: headers plus typed rows in export order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetModel {
    pub name: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// In-memory spreadsheet handed to the xlsx renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookModel {
    pub sheets: Vec<SheetModel>,
}

impl WorkbookModel {
    pub fn sheet(&self, name: &str) -> Option<&SheetModel> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
