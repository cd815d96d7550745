//! Report error types.

use chrono::NaiveDate;
use pasok_shared::AppError;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configured time zone is not a known IANA zone.
    #[error("Unknown time zone: {0}")]
    InvalidTimezone(String),

    /// Date filter lies outside the selected period.
    #[error("Date {date} is outside period {period} ({start} - {end})")]
    DateOutsidePeriod {
        /// Requested date.
        date: NaiveDate,
        /// Period name.
        period: String,
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// No completed transactions matched the filter.
    #[error("No completed transactions found for the selected filter")]
    NoDataFound,
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidTimezone(_) => Self::Internal(err.to_string()),
            ReportError::DateOutsidePeriod { .. } => Self::Validation(err.to_string()),
            ReportError::NoDataFound => Self::NotFound(err.to_string()),
        }
    }
}
