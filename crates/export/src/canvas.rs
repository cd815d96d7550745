//! Page cursor over a printpdf document.
//!
//! Coordinates are millimetres. `y` is the current baseline measured from the
//! bottom edge, moving down the page as rows are written.

#![allow(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::error::ExportError;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width in ems; builtin fonts carry no metrics.
const AVG_GLYPH_EM: f32 = 0.52;
const LAYER: &str = "Layer 1";

/// Horizontal text placement inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
    Center,
}

/// A table column: title, width and alignment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Column {
    pub title: &'static str,
    pub width: f32,
    pub align: Align,
}

pub(crate) struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f32,
    height: f32,
    pub margin: f32,
    pub y: f32,
    pages: usize,
}

fn pdf_err(err: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(err.to_string())
}

pub(crate) fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_EM * PT_TO_MM
}

/// Cuts `text` so it fits `width` at `size`, marking the cut with `..`.
pub(crate) fn fit(text: &str, width: f32, size: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }
    let max = (width / (size * AVG_GLYPH_EM * PT_TO_MM)).floor().max(2.0) as usize;
    let kept: String = text.chars().take(max.saturating_sub(2)).collect();
    format!("{}..", kept.trim_end())
}

impl Canvas {
    pub fn new(title: &str, width: f32, height: f32, margin: f32) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), LAYER);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            width,
            height,
            margin,
            y: height - margin,
            pages: 1,
        })
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn left(&self) -> f32 {
        self.margin
    }

    pub fn right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn top(&self) -> f32 {
        self.height - self.margin
    }

    pub fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(self.width), Mm(self.height), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.top();
        self.pages += 1;
    }

    /// Returns true if `height` more millimetres fit above the bottom margin.
    pub fn fits(&self, height: f32) -> bool {
        self.y - height >= self.margin
    }

    pub fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    pub fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    pub fn text_right(&self, text: &str, size: f32, right: f32, bold: bool) {
        self.text(text, size, right - text_width(text, size), bold);
    }

    pub fn text_center(&self, text: &str, size: f32, bold: bool) {
        let x = self.margin + (self.content_width() - text_width(text, size)) / 2.0;
        self.text(text, size, x.max(self.margin), bold);
    }

    /// Writes one cell starting at `x`.
    pub fn cell(&self, text: &str, size: f32, x: f32, column: &Column, bold: bool) {
        const PAD: f32 = 1.2;
        let inner = column.width - 2.0 * PAD;
        let text = fit(text, inner, size);
        match column.align {
            Align::Left => self.text(&text, size, x + PAD, bold),
            Align::Right => self.text_right(&text, size, x + column.width - PAD, bold),
            Align::Center => {
                let offset = (column.width - text_width(&text, size)) / 2.0;
                self.text(&text, size, x + offset.max(PAD), bold);
            }
        }
    }

    /// Writes a row of cells from the left margin.
    pub fn row(&self, cells: &[&str], columns: &[Column], size: f32, bold: bool) {
        let mut x = self.left();
        for (text, column) in cells.iter().zip(columns) {
            self.cell(text, size, x, column, bold);
            x += column.width;
        }
    }

    /// Horizontal rule at `offset` millimetres above the current baseline.
    pub fn rule(&self, x1: f32, x2: f32, offset: f32, thickness: f32) {
        let y = self.y + offset;
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    /// Stroked rectangle between two corners.
    pub fn frame(&self, left: f32, bottom: f32, right: f32, top: f32, thickness: f32) {
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(left), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(top)), false),
                (Point::new(Mm(left), Mm(top)), false),
            ],
            is_closed: true,
        });
    }

    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.doc.save_to_bytes().map_err(pdf_err)
    }
}
