//! Export error types.

use std::path::PathBuf;

use pasok_shared::AppError;
use thiserror::Error;

/// Errors raised while rendering or saving a document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The workbook could not be built.
    #[error("Excel export failed: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    /// The PDF could not be built.
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// There was nothing to put in the document.
    #[error("Nothing to render")]
    NothingToRender,

    /// The rendered file could not be written.
    #[error("Could not write {path}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NothingToRender => Self::NotFound(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}
