pub mod artifact;
pub mod column_spec;
pub mod document;
pub mod workbook;

pub use artifact::{ExportArtifact, ExportFormat};
pub use column_spec::{CellFormat, CellValue, ColumnSource, ColumnSpec};
pub use document::{DocumentModel, DocumentPage, NO_DATA_PLACEHOLDER};
pub use workbook::{ColumnHeader, SheetModel, WorkbookModel};
