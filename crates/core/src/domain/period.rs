//! Operational periods.

use chrono::{DateTime, NaiveDate, Utc};
use pasok_shared::types::PeriodId;
use serde::{Deserialize, Serialize};

/// An operational billing/reporting window.
///
/// Once `is_closed` is set by the server the period never reopens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Unique identifier.
    pub id: PeriodId,
    /// Period name (e.g., "Januari 2026").
    pub name: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Whether this is the period new transactions default to.
    #[serde(default, alias = "active")]
    pub is_active: bool,
    /// Whether the period has been permanently closed.
    #[serde(default, alias = "closed")]
    pub is_closed: bool,
    /// When the period was closed.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Period {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if transactions dated `date` may be recorded.
    #[must_use]
    pub fn accepts(&self, date: NaiveDate) -> bool {
        !self.is_closed && self.contains_date(date)
    }

    /// Returns true if a close request makes sense.
    #[must_use]
    pub fn can_close(&self) -> bool {
        !self.is_closed
    }

    /// Label used on report headers, e.g. `Januari 2026 (01/01/2026 - 31/01/2026)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} ({} - {})",
            self.name,
            self.start_date.format("%d/%m/%Y"),
            self.end_date.format("%d/%m/%Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(closed: bool) -> Period {
        Period {
            id: PeriodId(1),
            name: "Januari 2026".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            is_active: !closed,
            is_closed: closed,
            closed_at: None,
        }
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let p = period(false);
        assert!(p.contains_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert!(p.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
        assert!(!p.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn test_closed_period_rejects_everything() {
        let p = period(true);
        assert!(!p.can_close());
        assert!(!p.accepts(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
    }

    #[test]
    fn test_label() {
        assert_eq!(period(false).label(), "Januari 2026 (01/01/2026 - 31/01/2026)");
    }
}
