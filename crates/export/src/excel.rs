//! Excel workbook rendering.
//!
//! The workbook has one overview sheet with every date and supplier, a recap
//! table per date and the grand total, followed by one sheet per supplier
//! with that supplier's lines grouped by date.

use pasok_core::domain::Amounts;
use pasok_core::reports::{
    AggregatedReport, ReportHeader, ReportLine, SupplierLedger, long_date,
    long_date_with_weekday,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::sheet_name::SheetNames;

/// Name of the overview sheet.
pub const OVERVIEW_SHEET: &str = "Rekap";

const COLUMNS: [(&str, f64); 10] = [
    ("No", 5.0),
    ("Kode Transaksi", 20.0),
    ("Nama Barang", 30.0),
    ("Satuan", 9.0),
    ("Qty", 9.0),
    ("Harga Jual", 14.0),
    ("Total Jual", 16.0),
    ("Harga Modal", 14.0),
    ("Total Modal", 16.0),
    ("Laba", 16.0),
];
const LAST_COL: u16 = 9;
const QTY_COL: u16 = 4;
const SALE_COL: u16 = 6;
const COST_COL: u16 = 8;
const PROFIT_COL: u16 = 9;

const HEADER_FILL: u32 = 0x00D9_E1F2;
const SUPPLIER_FILL: u32 = 0x00FC_E4D6;
const TOTAL_FILL: u32 = 0x00E2_EFDA;

struct Formats {
    title: Format,
    subtitle: Format,
    label: Format,
    text: Format,
    date: Format,
    header: Format,
    supplier: Format,
    cell: Format,
    number: Format,
    money: Format,
    sub_label: Format,
    sub_number: Format,
    sub_money: Format,
    total_label: Format,
    total_number: Format,
    total_money: Format,
}

impl Formats {
    fn new() -> Self {
        let bordered = || Format::new().set_border(FormatBorder::Thin);
        let sub = || bordered().set_bold();
        let total = || {
            bordered()
                .set_bold()
                .set_background_color(Color::RGB(TOTAL_FILL))
        };
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center),
            subtitle: Format::new().set_bold().set_align(FormatAlign::Center),
            label: Format::new().set_bold(),
            text: Format::new(),
            date: Format::new().set_bold().set_font_size(12),
            header: bordered()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(HEADER_FILL)),
            supplier: bordered()
                .set_bold()
                .set_background_color(Color::RGB(SUPPLIER_FILL)),
            cell: bordered(),
            number: bordered().set_num_format("#,##0.##"),
            money: bordered().set_num_format("#,##0"),
            sub_label: sub().set_align(FormatAlign::Right),
            sub_number: sub().set_num_format("#,##0.##"),
            sub_money: sub().set_num_format("#,##0"),
            total_label: total().set_align(FormatAlign::Right),
            total_number: total().set_num_format("#,##0.##"),
            total_money: total().set_num_format("#,##0"),
        }
    }
}

#[derive(Clone, Copy)]
enum Emphasis {
    Subtotal,
    Total,
}

fn number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn count(value: usize) -> f64 {
    f64::from(u32::try_from(value).unwrap_or(u32::MAX))
}

struct SheetWriter<'a> {
    sheet: &'a mut Worksheet,
    formats: &'a Formats,
    row: u32,
}

impl<'a> SheetWriter<'a> {
    fn new(sheet: &'a mut Worksheet, formats: &'a Formats) -> Result<Self, XlsxError> {
        for (col, (_, width)) in (0u16..).zip(COLUMNS) {
            sheet.set_column_width(col, width)?;
        }
        Ok(Self {
            sheet,
            formats,
            row: 0,
        })
    }

    fn title_block(&mut self, header: &ReportHeader, subject: &str) -> Result<(), XlsxError> {
        let f = self.formats;
        self.sheet
            .merge_range(self.row, 0, self.row, LAST_COL, &header.business_name, &f.title)?;
        self.row += 1;
        self.sheet
            .merge_range(self.row, 0, self.row, LAST_COL, subject, &f.subtitle)?;
        self.row += 2;

        self.label_row("Dapur", &header.kitchen_name)?;
        self.label_row("Periode", &header.period_label)?;
        if let Some(date) = header.date {
            self.label_row("Tanggal", &long_date(date))?;
        }
        self.label_row(
            "Dicetak",
            &header.generated_at.format("%d/%m/%Y %H:%M").to_string(),
        )?;
        self.row += 1;
        Ok(())
    }

    fn label_row(&mut self, label: &str, value: &str) -> Result<(), XlsxError> {
        let f = self.formats;
        self.sheet
            .write_string_with_format(self.row, 0, label, &f.label)?;
        self.sheet
            .merge_range(self.row, 1, self.row, 5, value, &f.text)?;
        self.row += 1;
        Ok(())
    }

    fn date_heading(&mut self, text: &str) -> Result<(), XlsxError> {
        self.sheet
            .write_string_with_format(self.row, 0, text, &self.formats.date)?;
        self.row += 1;
        Ok(())
    }

    fn column_header(&mut self) -> Result<(), XlsxError> {
        for (col, (title, _)) in (0u16..).zip(COLUMNS) {
            self.sheet
                .write_string_with_format(self.row, col, title, &self.formats.header)?;
        }
        self.row += 1;
        Ok(())
    }

    fn banner(&mut self, text: &str) -> Result<(), XlsxError> {
        self.sheet
            .merge_range(self.row, 0, self.row, LAST_COL, text, &self.formats.supplier)?;
        self.row += 1;
        Ok(())
    }

    fn line(&mut self, number_in_group: usize, line: &ReportLine) -> Result<(), XlsxError> {
        let f = self.formats;
        let row = self.row;
        self.sheet
            .write_number_with_format(row, 0, count(number_in_group), &f.cell)?;
        self.sheet
            .write_string_with_format(row, 1, &line.transaction_code, &f.cell)?;
        self.sheet
            .write_string_with_format(row, 2, &line.goods_name, &f.cell)?;
        self.sheet.write_string_with_format(row, 3, &line.unit, &f.cell)?;
        self.sheet
            .write_number_with_format(row, QTY_COL, number(line.amounts.quantity), &f.number)?;
        self.sheet
            .write_number_with_format(row, 5, number(line.sale_price), &f.money)?;
        self.sheet
            .write_number_with_format(row, SALE_COL, number(line.amounts.sale), &f.money)?;
        self.sheet
            .write_number_with_format(row, 7, number(line.cost_price), &f.money)?;
        self.sheet
            .write_number_with_format(row, COST_COL, number(line.amounts.cost), &f.money)?;
        self.sheet
            .write_number_with_format(row, PROFIT_COL, number(line.amounts.profit), &f.money)?;
        self.row += 1;
        Ok(())
    }

    /// Label across the text columns, then quantity and the three totals.
    fn amounts_row(
        &mut self,
        label: &str,
        amounts: &Amounts,
        emphasis: Emphasis,
    ) -> Result<(), XlsxError> {
        let f = self.formats;
        let (label_fmt, number_fmt, money_fmt) = match emphasis {
            Emphasis::Subtotal => (&f.sub_label, &f.sub_number, &f.sub_money),
            Emphasis::Total => (&f.total_label, &f.total_number, &f.total_money),
        };
        let row = self.row;
        self.sheet
            .merge_range(row, 0, row, QTY_COL - 1, label, label_fmt)?;
        self.sheet
            .write_number_with_format(row, QTY_COL, number(amounts.quantity), number_fmt)?;
        self.sheet.write_blank(row, 5, money_fmt)?;
        self.sheet
            .write_number_with_format(row, SALE_COL, number(amounts.sale), money_fmt)?;
        self.sheet.write_blank(row, 7, money_fmt)?;
        self.sheet
            .write_number_with_format(row, COST_COL, number(amounts.cost), money_fmt)?;
        self.sheet
            .write_number_with_format(row, PROFIT_COL, number(amounts.profit), money_fmt)?;
        self.row += 1;
        Ok(())
    }

    fn gap(&mut self) {
        self.row += 1;
    }
}

fn write_overview(
    writer: &mut SheetWriter<'_>,
    header: &ReportHeader,
    report: &AggregatedReport,
) -> Result<(), XlsxError> {
    writer.title_block(header, "LAPORAN PENGIRIMAN BARANG")?;

    for day in &report.days {
        writer.date_heading(&long_date_with_weekday(day.date))?;
        writer.column_header()?;
        for section in &day.suppliers {
            writer.banner(&section.supplier_name)?;
            for (i, line) in section.lines.iter().enumerate() {
                writer.line(i + 1, line)?;
            }
            writer.amounts_row(
                &format!("Subtotal {}", section.supplier_name),
                &section.totals,
                Emphasis::Subtotal,
            )?;
        }
        writer.amounts_row(
            &format!("Total {}", long_date(day.date)),
            &day.totals,
            Emphasis::Total,
        )?;
        writer.gap();
    }

    writer.date_heading("REKAP PER TANGGAL")?;
    writer.column_header()?;
    for day in &report.days {
        writer.amounts_row(&long_date_with_weekday(day.date), &day.totals, Emphasis::Subtotal)?;
    }
    writer.amounts_row("GRAND TOTAL", &report.totals, Emphasis::Total)?;
    Ok(())
}

fn write_supplier(
    writer: &mut SheetWriter<'_>,
    header: &ReportHeader,
    ledger: &SupplierLedger,
) -> Result<(), XlsxError> {
    writer.title_block(header, &format!("RINCIAN {}", ledger.supplier_name.to_uppercase()))?;

    for day in &ledger.days {
        writer.date_heading(&long_date_with_weekday(day.date))?;
        writer.column_header()?;
        for (i, line) in day.lines.iter().enumerate() {
            writer.line(i + 1, line)?;
        }
        writer.amounts_row(
            &format!("Total {}", long_date(day.date)),
            &day.totals,
            Emphasis::Subtotal,
        )?;
        writer.gap();
    }
    writer.amounts_row(
        &format!("TOTAL {}", ledger.supplier_name.to_uppercase()),
        &ledger.totals,
        Emphasis::Total,
    )?;
    Ok(())
}

/// Sheet names in workbook order: the overview, then one per supplier.
#[must_use]
pub fn sheet_plan(ledgers: &[SupplierLedger]) -> Vec<String> {
    let mut names = SheetNames::default();
    let mut plan = vec![names.claim(OVERVIEW_SHEET)];
    plan.extend(ledgers.iter().map(|l| names.claim(&l.supplier_name)));
    plan
}

/// Renders the report to an in-memory `.xlsx` file.
pub fn render_workbook(
    header: &ReportHeader,
    report: &AggregatedReport,
) -> Result<Vec<u8>, ExportError> {
    let formats = Formats::new();
    let ledgers = report.supplier_ledgers();
    let plan = sheet_plan(&ledgers);
    let mut workbook = Workbook::new();

    let overview = workbook.add_worksheet();
    overview.set_name(&plan[0])?;
    write_overview(&mut SheetWriter::new(overview, &formats)?, header, report)?;

    for (ledger, name) in ledgers.iter().zip(plan.iter().skip(1)) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_supplier(&mut SheetWriter::new(sheet, &formats)?, header, ledger)?;
        debug!(sheet = %name, days = ledger.days.len(), "supplier sheet written");
    }

    let buffer = workbook.save_to_buffer()?;
    info!(
        kitchen = %header.kitchen_name,
        sheets = plan.len(),
        lines = report.line_count(),
        size = buffer.len(),
        "workbook rendered"
    );
    Ok(buffer)
}
