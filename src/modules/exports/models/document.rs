use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text shown in place of the table when a document has no rows
pub const NO_DATA_PLACEHOLDER: &str = "No data available";

/// One page worth of display rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPage {
    /// 1-based
    pub number: usize,
    pub rows: Vec<Vec<String>>,
}

/// In-memory paginated document handed to the PDF renderer.
///
/// Cells are already formatted strings; row order is export order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub title: String,
    pub subtitle: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub headers: Vec<String>,
    /// Always at least one page, possibly without rows
    pub pages: Vec<DocumentPage>,
    /// Grand total line printed after the last page's rows
    pub totals_row: Option<Vec<String>>,
    pub footer: Option<String>,
}

impl DocumentModel {
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// All rows across pages, in order
    pub fn rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.pages.iter().flat_map(|p| p.rows.iter())
    }
}
