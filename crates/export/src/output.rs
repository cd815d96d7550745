//! File names and writing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::error::ExportError;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// `.xlsx` workbook.
    Excel,
    /// `.pdf` document.
    Pdf,
}

impl ReportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

/// Lowercase ASCII slug; runs of other characters become one `-`.
#[must_use]
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "data".to_string()
    } else {
        trimmed.to_string()
    }
}

fn stamp(at: NaiveDateTime) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

/// `laporan-<kitchen>-<period>[-<date>]-<YYYYMMDD-HHMMSS>.<ext>`
#[must_use]
pub fn report_filename(
    kitchen: &str,
    period: &str,
    date: Option<NaiveDate>,
    at: NaiveDateTime,
    format: ReportFormat,
) -> String {
    let mut name = format!("laporan-{}-{}", slug(kitchen), slug(period));
    if let Some(date) = date {
        name.push('-');
        name.push_str(&date.format("%Y-%m-%d").to_string());
    }
    format!("{name}-{}.{}", stamp(at), format.extension())
}

/// `nota-<transaction code>-<YYYYMMDD-HHMMSS>.pdf`
#[must_use]
pub fn receipt_filename(code: &str, at: NaiveDateTime) -> String {
    format!("nota-{}-{}.pdf", slug(code), stamp(at))
}

/// Writes `bytes` to `dir/filename`, creating `dir` if needed.
pub fn write_export(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let path = dir.join(filename);
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), size = bytes.len(), "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Dapur Utama (Pusat)"), "dapur-utama-pusat");
        assert_eq!(slug("TRX/2026/001"), "trx-2026-001");
        assert_eq!(slug("  "), "data");
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(
            report_filename("Dapur Utama", "Januari 2026", None, at(), ReportFormat::Excel),
            "laporan-dapur-utama-januari-2026-20260131-140509.xlsx"
        );
        assert_eq!(
            report_filename(
                "Dapur Utama",
                "Januari 2026",
                NaiveDate::from_ymd_opt(2026, 1, 5),
                at(),
                ReportFormat::Pdf
            ),
            "laporan-dapur-utama-januari-2026-2026-01-05-20260131-140509.pdf"
        );
    }

    #[test]
    fn test_receipt_filename() {
        assert_eq!(
            receipt_filename("TRX-20260105-001", at()),
            "nota-trx-20260105-001-20260131-140509.pdf"
        );
    }

    #[test]
    fn test_write_export_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let path = write_export(&target, "a.pdf", b"%PDF").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF");
    }
}
