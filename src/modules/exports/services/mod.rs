pub mod exporter;
pub mod pdf_renderer;
pub mod xlsx_renderer;

pub use exporter::ReportExporter;
pub use pdf_renderer::render_document;
pub use xlsx_renderer::render_workbook;
