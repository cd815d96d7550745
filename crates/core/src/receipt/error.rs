//! Receipt error types.

use pasok_shared::AppError;
use thiserror::Error;

/// Errors that can occur while preparing receipts.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A configured template name is not known.
    #[error("Unknown receipt template: {0}")]
    UnknownTemplate(String),

    /// The transaction has no line items to print.
    #[error("Transaction {0} has no items to print")]
    EmptyTransaction(String),
}

impl From<ReceiptError> for AppError {
    fn from(err: ReceiptError) -> Self {
        match err {
            ReceiptError::UnknownTemplate(_) => Self::Internal(err.to_string()),
            ReceiptError::EmptyTransaction(_) => Self::BusinessRule(err.to_string()),
        }
    }
}
