//! Document rendering for Pasok.
//!
//! Turns an aggregated report into an `.xlsx` workbook or a PDF, and a
//! transaction into per-supplier receipt pages. Renderers return bytes;
//! [`output`] names and writes the files.

pub mod error;
pub mod excel;
pub mod output;
pub mod pdf;
pub mod receipt;
pub mod sheet_name;

mod canvas;

#[cfg(test)]
mod tests;

pub use error::ExportError;
pub use excel::render_workbook;
pub use output::{ReportFormat, receipt_filename, report_filename, write_export};
pub use pdf::render_report_pdf;
pub use receipt::render_receipts;
