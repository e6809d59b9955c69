use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::core::{AppError, Result};
use crate::modules::exports::models::{DocumentModel, DocumentPage, NO_DATA_PLACEHOLDER};

// A4 landscape
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 6.5;
const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;
/// Rough Helvetica glyph width at [`BODY_SIZE`], used to clip cells
const CHAR_WIDTH: f32 = 1.9;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render a paginated document model as PDF bytes.
///
/// Every model page becomes one PDF page with the title block, the header
/// row and a footer carrying the page number. The totals row goes after
/// the last page's rows.
pub fn render_document(model: &DocumentModel) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        model.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
    };

    let page_count = model.pages.len().max(1);
    let empty_page = DocumentPage {
        number: 1,
        rows: Vec::new(),
    };
    let pages: Vec<&DocumentPage> = if model.pages.is_empty() {
        vec![&empty_page]
    } else {
        model.pages.iter().collect()
    };

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page_ref).get_layer(layer_ref)
        };
        let is_last = index + 1 == page_count;
        draw_page(&layer, &fonts, model, page, page_count, is_last);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw_page(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    model: &DocumentModel,
    page: &DocumentPage,
    page_count: usize,
    is_last: bool,
) {
    let mut y = PAGE_HEIGHT - MARGIN - 5.0;
    layer.use_text(model.title.as_str(), TITLE_SIZE, Mm(MARGIN), Mm(y), &fonts.bold);
    y -= 7.0;

    if let Some(subtitle) = &model.subtitle {
        layer.use_text(subtitle.as_str(), SUBTITLE_SIZE, Mm(MARGIN), Mm(y), &fonts.regular);
        y -= 6.0;
    }
    y -= 4.0;

    let column_width = column_width(model.headers.len());
    draw_row(layer, &fonts.bold, &model.headers, y, column_width);
    y -= ROW_HEIGHT;

    if model.is_empty() {
        layer.use_text(NO_DATA_PLACEHOLDER, BODY_SIZE, Mm(MARGIN), Mm(y), &fonts.regular);
    } else {
        for row in &page.rows {
            draw_row(layer, &fonts.regular, row, y, column_width);
            y -= ROW_HEIGHT;
        }
        if is_last {
            if let Some(totals) = &model.totals_row {
                draw_row(layer, &fonts.bold, totals, y, column_width);
            }
        }
    }

    let mut footer = format!(
        "Page {} of {} | Generated {}",
        page.number,
        page_count,
        model.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(brand) = &model.footer {
        footer = format!("{} | {}", brand, footer);
    }
    layer.use_text(footer, FOOTER_SIZE, Mm(MARGIN), Mm(MARGIN / 2.0), &fonts.regular);
}

fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    cells: &[String],
    y: f32,
    column_width: f32,
) {
    let max_chars = ((column_width / CHAR_WIDTH) as usize).max(4);
    for (col, cell) in cells.iter().enumerate() {
        let x = MARGIN + column_width * col as f32;
        layer.use_text(clip(cell, max_chars), BODY_SIZE, Mm(x), Mm(y), font);
    }
}

fn column_width(columns: usize) -> f32 {
    (PAGE_WIDTH - 2.0 * MARGIN) / columns.max(1) as f32
}

/// Shorten `text` to `max_chars`, marking the cut with "..."
fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn pdf_error(err: impl std::fmt::Debug) -> AppError {
    AppError::export(format!("pdf: {:?}", err))
}
