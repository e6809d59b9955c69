pub mod models;
pub mod services;

pub use models::{
    CellFormat, CellValue, ColumnSource, ColumnSpec, DocumentModel, ExportArtifact, ExportFormat,
    SheetModel, WorkbookModel,
};
pub use services::ReportExporter;
