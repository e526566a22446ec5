//! # PDF Backend
//!
//! Flows a list of [`DocRow`]s top-down onto printpdf pages, breaking to a
//! new page when the bottom margin is reached. Builtin fonts only, so no
//! font files ship with the application: Helvetica for the wide documents,
//! Courier for the fixed-width ticket.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::{RenderError, RenderResult};

// =============================================================================
// Layout Model
// =============================================================================

/// One positioned piece of text on a row.
#[derive(Debug, Clone, PartialEq)]
pub struct DocCell {
    pub text: String,
    /// Left edge, millimetres from the page's left side.
    pub x_mm: f32,
    pub size_pt: f32,
    pub bold: bool,
}

/// One horizontal band of the document. All cells share the same baseline;
/// `advance_mm` is the distance to the next row's baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct DocRow {
    pub cells: Vec<DocCell>,
    pub advance_mm: f32,
}

impl DocRow {
    /// A row with a single regular-weight cell.
    pub fn text(text: impl Into<String>, x_mm: f32, size_pt: f32, advance_mm: f32) -> Self {
        DocRow {
            cells: vec![DocCell {
                text: text.into(),
                x_mm,
                size_pt,
                bold: false,
            }],
            advance_mm,
        }
    }

    /// A row with a single bold cell.
    pub fn bold(text: impl Into<String>, x_mm: f32, size_pt: f32, advance_mm: f32) -> Self {
        DocRow {
            cells: vec![DocCell {
                text: text.into(),
                x_mm,
                size_pt,
                bold: true,
            }],
            advance_mm,
        }
    }

    /// Vertical whitespace.
    pub fn gap(advance_mm: f32) -> Self {
        DocRow {
            cells: Vec::new(),
            advance_mm,
        }
    }

    /// Concatenated text of every cell, for content assertions in tests.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Paper
// =============================================================================

/// The two page formats this system prints on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paper {
    /// 210 × 297 mm invoice/quote page.
    A4,
    /// 80 mm thermal roll, fixed 297 mm page height.
    Roll80,
}

impl Paper {
    fn width_mm(self) -> f32 {
        match self {
            Paper::A4 => 210.0,
            Paper::Roll80 => 80.0,
        }
    }

    fn height_mm(self) -> f32 {
        297.0
    }

    fn margin_top_mm(self) -> f32 {
        match self {
            Paper::A4 => 15.0,
            Paper::Roll80 => 10.0,
        }
    }

    fn margin_bottom_mm(self) -> f32 {
        match self {
            Paper::A4 => 15.0,
            Paper::Roll80 => 5.0,
        }
    }

    fn regular_font(self) -> BuiltinFont {
        match self {
            Paper::A4 => BuiltinFont::Helvetica,
            Paper::Roll80 => BuiltinFont::Courier,
        }
    }

    fn bold_font(self) -> BuiltinFont {
        match self {
            Paper::A4 => BuiltinFont::HelveticaBold,
            Paper::Roll80 => BuiltinFont::CourierBold,
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders rows onto as many pages as they need and returns the PDF bytes.
pub fn render_pdf(title: &str, rows: &[DocRow], paper: Paper) -> RenderResult<Vec<u8>> {
    let width = paper.width_mm();
    let height = paper.height_mm();

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");
    let regular = doc
        .add_builtin_font(paper.regular_font())
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(paper.bold_font())
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = height - paper.margin_top_mm();

    for row in rows {
        if y < paper.margin_bottom_mm() {
            let (page, page_layer) = doc.add_page(Mm(width), Mm(height), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = height - paper.margin_top_mm();
        }
        for cell in &row.cells {
            let font = if cell.bold { &bold } else { &regular };
            layer.use_text(cell.text.clone(), cell.size_pt, Mm(cell.x_mm), Mm(y), font);
        }
        y -= row.advance_mm;
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    buffer
        .into_inner()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_pdf_has_pdf_header() {
        let rows = vec![
            DocRow::bold("FACTURA", 15.0, 16.0, 10.0),
            DocRow::text("Subtotal: $200.00", 125.0, 10.0, 6.0),
        ];
        let bytes = render_pdf("test", &rows, Paper::A4).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_long_documents_paginate() {
        // Enough rows to overflow a single A4 page at 6 mm per row.
        let rows: Vec<DocRow> = (0..120)
            .map(|i| DocRow::text(format!("line {}", i), 15.0, 10.0, 6.0))
            .collect();
        let paginated = render_pdf("long", &rows, Paper::A4).unwrap();

        let short = render_pdf("short", &rows[..5], Paper::A4).unwrap();
        assert!(paginated.len() > short.len());
    }

    #[test]
    fn test_ticket_paper_renders() {
        let rows = vec![DocRow::text("GRACIAS", 5.0, 10.0, 5.0)];
        let bytes = render_pdf("ticket", &rows, Paper::Roll80).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_plain_text_joins_cells() {
        let row = DocRow {
            cells: vec![
                DocCell {
                    text: "Subtotal:".to_string(),
                    x_mm: 125.0,
                    size_pt: 10.0,
                    bold: false,
                },
                DocCell {
                    text: "$200.00".to_string(),
                    x_mm: 165.0,
                    size_pt: 10.0,
                    bold: false,
                },
            ],
            advance_mm: 6.0,
        };
        assert_eq!(row.plain_text(), "Subtotal: $200.00");
    }
}
