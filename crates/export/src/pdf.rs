//! Report PDF rendering.
//!
//! A4 landscape. One table per date; rows are grouped by supplier with a
//! counter that restarts at each supplier. The column header repeats at the
//! top of every page a table continues on.

#![allow(clippy::float_arithmetic)]

use pasok_core::domain::Amounts;
use pasok_core::reports::{AggregatedReport, ReportHeader, ReportLine, long_date, long_date_with_weekday};
use pasok_shared::types::format_number;
use tracing::info;

use crate::canvas::{Align, Canvas, Column};
use crate::error::ExportError;

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 10.0;
const BODY_SIZE: f32 = 8.0;
const ROW_HEIGHT: f32 = 5.0;

const COLUMNS: [Column; 10] = [
    Column { title: "No", width: 10.0, align: Align::Center },
    Column { title: "Kode Transaksi", width: 36.0, align: Align::Left },
    Column { title: "Nama Barang", width: 62.0, align: Align::Left },
    Column { title: "Satuan", width: 18.0, align: Align::Center },
    Column { title: "Qty", width: 18.0, align: Align::Right },
    Column { title: "Harga Jual", width: 25.0, align: Align::Right },
    Column { title: "Total Jual", width: 27.0, align: Align::Right },
    Column { title: "Harga Modal", width: 25.0, align: Align::Right },
    Column { title: "Total Modal", width: 27.0, align: Align::Right },
    Column { title: "Laba", width: 29.0, align: Align::Right },
];

struct ReportPage {
    canvas: Canvas,
    /// Title of the table in progress, repeated after a page break.
    open_table: Option<String>,
}

impl ReportPage {
    fn new() -> Result<Self, ExportError> {
        Ok(Self {
            canvas: Canvas::new("Laporan Pengiriman", PAGE_WIDTH, PAGE_HEIGHT, MARGIN)?,
            open_table: None,
        })
    }

    fn header_block(&mut self, header: &ReportHeader) {
        let c = &mut self.canvas;
        c.text_center(&header.business_name, 14.0, true);
        c.advance(6.5);
        c.text_center("LAPORAN PENGIRIMAN BARANG", 11.0, true);
        c.advance(8.0);

        let mut info = vec![
            ("Dapur", header.kitchen_name.clone()),
            ("Periode", header.period_label.clone()),
        ];
        if let Some(date) = header.date {
            info.push(("Tanggal", long_date(date)));
        }
        info.push(("Dicetak", header.generated_at.format("%d/%m/%Y %H:%M").to_string()));
        for (label, value) in info {
            c.text(label, 9.0, c.left(), true);
            c.text(&format!(": {value}"), 9.0, c.left() + 18.0, false);
            c.advance(4.5);
        }
        c.advance(3.0);
    }

    fn column_header(&mut self) {
        let c = &mut self.canvas;
        let titles: Vec<&str> = COLUMNS.iter().map(|col| col.title).collect();
        c.rule(c.left(), c.right(), ROW_HEIGHT - 1.2, 0.6);
        c.row(&titles, &COLUMNS, BODY_SIZE, true);
        c.rule(c.left(), c.right(), -1.6, 0.6);
        c.advance(ROW_HEIGHT);
    }

    /// Breaks the page when `height` does not fit, repeating the open table's header.
    fn reserve(&mut self, height: f32) {
        if self.canvas.fits(height) {
            return;
        }
        self.canvas.new_page();
        if let Some(title) = self.open_table.clone() {
            self.canvas
                .text(&format!("{title} (lanjutan)"), 10.0, MARGIN, true);
            self.canvas.advance(6.0);
            self.column_header();
        }
    }

    fn open(&mut self, title: String) {
        // heading plus header plus one row stay together
        self.reserve(6.0 + 2.0 * ROW_HEIGHT);
        self.canvas.text(&title, 10.0, MARGIN, true);
        self.canvas.advance(6.0);
        self.open_table = Some(title);
        self.column_header();
    }

    fn close(&mut self) {
        self.open_table = None;
        self.canvas.advance(4.0);
    }

    fn supplier_row(&mut self, name: &str) {
        self.reserve(2.0 * ROW_HEIGHT);
        self.canvas.text(name, BODY_SIZE, MARGIN + 1.2, true);
        self.canvas.advance(ROW_HEIGHT);
    }

    fn line(&mut self, number: usize, line: &ReportLine) {
        self.reserve(ROW_HEIGHT);
        let cells = [
            number.to_string(),
            line.transaction_code.clone(),
            line.goods_name.clone(),
            line.unit.clone(),
            format_number(line.amounts.quantity),
            format_number(line.sale_price),
            format_number(line.amounts.sale),
            format_number(line.cost_price),
            format_number(line.amounts.cost),
            format_number(line.amounts.profit),
        ];
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        self.canvas.row(&cells, &COLUMNS, BODY_SIZE, false);
        self.canvas.advance(ROW_HEIGHT);
    }

    fn amounts_row(&mut self, label: &str, amounts: &Amounts, strong: bool) {
        self.reserve(ROW_HEIGHT);
        let c = &mut self.canvas;
        if strong {
            c.rule(c.left(), c.right(), ROW_HEIGHT - 1.2, 0.4);
        }
        let label_width: f32 = COLUMNS[..4].iter().map(|col| col.width).sum();
        let label_col = Column {
            title: "",
            width: label_width,
            align: Align::Right,
        };
        c.cell(label, BODY_SIZE, c.left(), &label_col, true);

        let qty = format_number(amounts.quantity);
        let sale = format_number(amounts.sale);
        let cost = format_number(amounts.cost);
        let profit = format_number(amounts.profit);
        let cells = ["", "", "", "", qty.as_str(), "", sale.as_str(), "", cost.as_str(), profit.as_str()];
        c.row(&cells, &COLUMNS, BODY_SIZE, true);
        if strong {
            c.rule(c.left(), c.right(), -1.6, 0.4);
        }
        c.advance(ROW_HEIGHT);
    }
}

fn layout(header: &ReportHeader, report: &AggregatedReport) -> Result<Canvas, ExportError> {
    let mut page = ReportPage::new()?;
    page.header_block(header);

    for day in &report.days {
        page.open(long_date_with_weekday(day.date));
        for section in &day.suppliers {
            page.supplier_row(&section.supplier_name);
            for (i, line) in section.lines.iter().enumerate() {
                page.line(i + 1, line);
            }
            page.amounts_row(&format!("Subtotal {}", section.supplier_name), &section.totals, false);
        }
        page.amounts_row(&format!("Total {}", long_date(day.date)), &day.totals, true);
        page.close();
    }

    page.amounts_row("GRAND TOTAL", &report.totals, true);
    Ok(page.canvas)
}

/// Renders the report to PDF bytes.
pub fn render_report_pdf(
    header: &ReportHeader,
    report: &AggregatedReport,
) -> Result<Vec<u8>, ExportError> {
    let canvas = layout(header, report)?;
    let pages = canvas.pages();
    let bytes = canvas.finish()?;
    info!(
        kitchen = %header.kitchen_name,
        pages,
        lines = report.line_count(),
        size = bytes.len(),
        "report pdf rendered"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{long_report, sample_report};

    #[test]
    fn test_column_widths_fill_page() {
        let total: f32 = COLUMNS.iter().map(|c| c.width).sum();
        assert!((total - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 0.01);
    }

    #[test]
    fn test_small_report_is_one_page() {
        let (header, report) = sample_report();
        assert_eq!(layout(&header, &report).unwrap().pages(), 1);
        let bytes = render_report_pdf(&header, &report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_paginates() {
        let (header, report) = long_report(120);
        assert!(layout(&header, &report).unwrap().pages() > 1);
    }
}
