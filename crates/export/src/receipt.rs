//! Receipt ("nota") PDF rendering, one A5 page per supplier.

#![allow(clippy::float_arithmetic)]

use pasok_core::receipt::{SupplierReceipt, TemplateKind};
use pasok_core::reports::long_date;
use pasok_shared::types::{format_number, format_rupiah};
use tracing::{debug, info};

use crate::canvas::{Align, Canvas, Column};
use crate::error::ExportError;

const PAGE_WIDTH: f32 = 148.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 12.0;
const SIGNATURE_SPACE: f32 = 30.0;

const COLUMNS: [Column; 6] = [
    Column { title: "No", width: 8.0, align: Align::Center },
    Column { title: "Nama Barang", width: 46.0, align: Align::Left },
    Column { title: "Qty", width: 16.0, align: Align::Right },
    Column { title: "Satuan", width: 14.0, align: Align::Center },
    Column { title: "Harga", width: 20.0, align: Align::Right },
    Column { title: "Jumlah", width: 20.0, align: Align::Right },
];

/// Layout knobs that differ between templates.
#[derive(Debug, Clone, Copy)]
struct Style {
    size: f32,
    row: f32,
    border: bool,
    letterhead: bool,
    ruled_rows: bool,
    signatures: bool,
}

impl Style {
    fn for_kind(kind: TemplateKind) -> Self {
        let generic = Self {
            size: 9.0,
            row: 5.5,
            border: false,
            letterhead: false,
            ruled_rows: false,
            signatures: true,
        };
        match kind {
            TemplateKind::Generic => generic,
            TemplateKind::Bordered => Self {
                border: true,
                ruled_rows: true,
                ..generic
            },
            TemplateKind::Compact => Self {
                size: 8.0,
                row: 4.5,
                signatures: false,
                ..generic
            },
            TemplateKind::Letterhead => Self {
                letterhead: true,
                ..generic
            },
        }
    }
}

struct ReceiptPage<'a> {
    canvas: &'a mut Canvas,
    style: Style,
}

impl ReceiptPage<'_> {
    fn frame(&mut self) {
        if self.style.border {
            let inset = MARGIN - 4.0;
            self.canvas
                .frame(inset, inset, PAGE_WIDTH - inset, PAGE_HEIGHT - inset, 0.8);
        }
    }

    fn heading(&mut self, business_name: &str, receipt: &SupplierReceipt) {
        let c = &mut *self.canvas;
        if self.style.letterhead {
            c.text_center(&receipt.supplier_name.to_uppercase(), 16.0, true);
            c.advance(6.0);
            for extra in [&receipt.supplier_address, &receipt.supplier_phone]
                .into_iter()
                .flatten()
            {
                c.text_center(extra, 9.0, false);
                c.advance(4.5);
            }
            c.rule(c.left(), c.right(), 1.0, 1.2);
            c.rule(c.left(), c.right(), 0.0, 0.3);
            c.advance(8.0);
        } else {
            c.text(&receipt.supplier_name, 12.0, c.left(), true);
            c.text_right(business_name, 9.0, c.right(), false);
            c.advance(5.0);
            if let Some(address) = &receipt.supplier_address {
                c.text(address, 8.0, c.left(), false);
                c.advance(4.0);
            }
            if let Some(phone) = &receipt.supplier_phone {
                c.text(&format!("Telp. {phone}"), 8.0, c.left(), false);
                c.advance(4.0);
            }
            c.advance(3.0);
        }

        c.text_center("NOTA PENGIRIMAN", 12.0, true);
        c.advance(8.0);
        let info = [
            ("No. Nota", receipt.transaction_code.clone()),
            ("Tanggal", long_date(receipt.date)),
            ("Kepada", receipt.kitchen_name.clone()),
        ];
        for (label, value) in info {
            c.text(label, self.style.size, c.left(), false);
            c.text(&format!(": {value}"), self.style.size, c.left() + 18.0, false);
            c.advance(self.style.row - 0.5);
        }
        c.advance(2.0);
    }

    fn column_header(&mut self) {
        let c = &mut *self.canvas;
        let titles: Vec<&str> = COLUMNS.iter().map(|col| col.title).collect();
        c.rule(c.left(), c.right(), self.style.row - 1.3, 0.6);
        c.row(&titles, &COLUMNS, self.style.size, true);
        c.rule(c.left(), c.right(), -1.6, 0.6);
        c.advance(self.style.row);
    }

    fn reserve(&mut self, height: f32, receipt: &SupplierReceipt) {
        if self.canvas.fits(height) {
            return;
        }
        self.canvas.new_page();
        self.frame();
        let title = format!("{} - {} (lanjutan)", receipt.supplier_name, receipt.transaction_code);
        self.canvas.text(&title, self.style.size, MARGIN, true);
        self.canvas.advance(self.style.row + 1.0);
        self.column_header();
    }

    fn lines(&mut self, receipt: &SupplierReceipt) {
        for line in &receipt.lines {
            self.reserve(self.style.row, receipt);
            let cells = [
                line.number.to_string(),
                line.goods_name.clone(),
                format_number(line.quantity),
                line.unit.clone(),
                format_number(line.price),
                format_number(line.subtotal),
            ];
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            let c = &mut *self.canvas;
            c.row(&cells, &COLUMNS, self.style.size, false);
            if self.style.ruled_rows {
                c.rule(c.left(), c.right(), -1.6, 0.2);
            }
            c.advance(self.style.row);
        }
    }

    fn total(&mut self, receipt: &SupplierReceipt) {
        self.reserve(self.style.row + 2.0, receipt);
        let c = &mut *self.canvas;
        c.rule(c.left(), c.right(), self.style.row - 1.3, 0.6);
        let label_width: f32 = COLUMNS[..2].iter().map(|col| col.width).sum();
        let label = Column {
            title: "",
            width: label_width,
            align: Align::Right,
        };
        c.cell("TOTAL", self.style.size, c.left(), &label, true);
        let qty = format_number(receipt.total_quantity);
        let total = format_rupiah(receipt.total);
        c.row(&["", "", qty.as_str()], &COLUMNS, self.style.size, true);
        c.text_right(&total, self.style.size, c.right() - 1.2, true);
        c.advance(self.style.row + 2.0);
    }

    fn signatures(&mut self, receipt: &SupplierReceipt) {
        if !self.style.signatures {
            return;
        }
        self.reserve(SIGNATURE_SPACE, receipt);
        let c = &mut *self.canvas;
        let half = c.content_width() / 2.0;
        let left = c.left() + 6.0;
        let right = c.left() + half + 6.0;
        c.advance(4.0);
        c.text("Penerima,", self.style.size, left, false);
        c.text("Hormat kami,", self.style.size, right, false);
        c.advance(SIGNATURE_SPACE - 12.0);
        c.text("( ........................ )", self.style.size, left, false);
        c.text("( ........................ )", self.style.size, right, false);
        c.advance(self.style.row);
    }
}

/// Renders each receipt on its own page.
pub fn render_receipts(
    business_name: &str,
    receipts: &[SupplierReceipt],
) -> Result<Vec<u8>, ExportError> {
    let canvas = layout(business_name, receipts)?;
    let pages = canvas.pages();
    let bytes = canvas.finish()?;
    info!(receipts = receipts.len(), pages, size = bytes.len(), "receipts rendered");
    Ok(bytes)
}

fn layout(business_name: &str, receipts: &[SupplierReceipt]) -> Result<Canvas, ExportError> {
    if receipts.is_empty() {
        return Err(ExportError::NothingToRender);
    }
    let mut canvas = Canvas::new("Nota Pengiriman", PAGE_WIDTH, PAGE_HEIGHT, MARGIN)?;

    for (i, receipt) in receipts.iter().enumerate() {
        if i > 0 {
            canvas.new_page();
        }
        debug!(supplier = %receipt.supplier_name, template = %receipt.template, "receipt page");
        let mut page = ReceiptPage {
            canvas: &mut canvas,
            style: Style::for_kind(receipt.template),
        };
        page.frame();
        page.heading(business_name, receipt);
        page.column_header();
        page.lines(receipt);
        page.total(receipt);
        page.signatures(receipt);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::day;
    use pasok_core::receipt::ReceiptLine;
    use rust_decimal_macros::dec;

    fn receipt(supplier: &str, template: TemplateKind, lines: usize) -> SupplierReceipt {
        let lines: Vec<ReceiptLine> = (1..=lines)
            .map(|number| ReceiptLine {
                number,
                goods_name: format!("Barang {number}"),
                unit: "kg".to_string(),
                quantity: dec!(2),
                price: dec!(1000),
                subtotal: dec!(2000),
            })
            .collect();
        SupplierReceipt {
            template,
            supplier_name: supplier.to_string(),
            supplier_address: Some("Jl. Pasar Baru 1".to_string()),
            supplier_phone: Some("0812".to_string()),
            transaction_code: "TRX-010".to_string(),
            date: day(5),
            kitchen_name: "Dapur Pusat".to_string(),
            total_quantity: dec!(2) * rust_decimal::Decimal::from(lines.len()),
            total: dec!(2000) * rust_decimal::Decimal::from(lines.len()),
            lines,
        }
    }

    #[test]
    fn test_one_page_per_supplier() {
        let receipts = vec![
            receipt("UD Anugerah", TemplateKind::Generic, 3),
            receipt("UD Sumber Rejeki", TemplateKind::Bordered, 2),
            receipt("UD Tani Jaya", TemplateKind::Compact, 1),
            receipt("UD Makmur", TemplateKind::Letterhead, 4),
        ];
        let canvas = layout("Pasok", &receipts).unwrap();
        assert_eq!(canvas.pages(), 4);
        assert!(render_receipts("Pasok", &receipts).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_receipt_continues() {
        let receipts = vec![receipt("UD Anugerah", TemplateKind::Generic, 60)];
        assert!(layout("Pasok", &receipts).unwrap().pages() > 1);
    }

    #[test]
    fn test_nothing_to_render() {
        assert!(matches!(
            render_receipts("Pasok", &[]),
            Err(ExportError::NothingToRender)
        ));
    }
}
