//! Outcome bookkeeping for bulk uploads.
//!
//! Rows are submitted one by one. A failed row is recorded and skipped;
//! nothing is retried or rolled back.

use serde::{Deserialize, Serialize};

/// A row that could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    /// 1-based row number in the source file.
    pub row: usize,
    /// Row label (usually the goods name).
    pub label: String,
    /// User-facing reason.
    pub reason: String,
}

/// Summary of a bulk run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSummary {
    /// Rows attempted.
    pub total: usize,
    /// Rows created.
    pub succeeded: usize,
    /// Rows that failed, in row order.
    pub failures: Vec<BulkFailure>,
}

impl BulkSummary {
    /// Records a created row.
    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    /// Records a failed row.
    pub fn record_failure(&mut self, row: usize, label: impl Into<String>, reason: impl Into<String>) {
        self.total += 1;
        self.failures.push(BulkFailure {
            row,
            label: label.into(),
            reason: reason.into(),
        });
    }

    /// Number of failed rows.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if every row succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary, e.g. `8 of 10 rows imported, 2 failed`.
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "{} of {} rows imported, {} failed",
            self.succeeded,
            self.total,
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut summary = BulkSummary::default();
        summary.record_success();
        summary.record_failure(2, "Telur", "Kode barang sudah dipakai");
        summary.record_success();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_clean());
        assert_eq!(summary.failures[0].row, 2);
        assert_eq!(summary.headline(), "2 of 3 rows imported, 1 failed");
    }
}
