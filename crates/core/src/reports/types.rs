//! Report data types.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use pasok_shared::types::{GoodsId, KitchenId, PeriodId, SupplierId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Amounts, Transaction, TransactionStatus};

/// Label used when a line's supplier cannot be resolved.
pub const UNKNOWN_SUPPLIER: &str = "Unknown";

/// Label used when a line's goods (or unit) cannot be resolved.
pub const UNKNOWN_GOODS: &str = "-";

/// Which transactions a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Receiving kitchen.
    pub kitchen_id: KitchenId,
    /// Period.
    pub period_id: PeriodId,
    /// Optional single day within the period.
    pub date: Option<NaiveDate>,
}

impl ReportFilter {
    /// True if `transaction` is a completed one this filter covers.
    ///
    /// The date is compared on the local calendar day in `tz`.
    #[must_use]
    pub fn admits(&self, transaction: &Transaction, tz: Tz) -> bool {
        transaction.status == TransactionStatus::Completed
            && transaction.kitchen_id == self.kitchen_id
            && transaction.period_id == self.period_id
            && self
                .date
                .is_none_or(|date| transaction.date.local_date(tz) == date)
    }
}

/// Header metadata printed above every rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    /// Business name.
    pub business_name: String,
    /// Kitchen name.
    pub kitchen_name: String,
    /// Period label.
    pub period_label: String,
    /// Date filter, if any.
    pub date: Option<NaiveDate>,
    /// Local time the report was generated.
    pub generated_at: NaiveDateTime,
}

/// An enriched line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Source transaction.
    pub transaction_id: TransactionId,
    /// Source transaction code.
    pub transaction_code: String,
    /// Local calendar date.
    pub date: NaiveDate,
    /// Goods reference, if any.
    pub goods_id: Option<GoodsId>,
    /// Resolved goods name or [`UNKNOWN_GOODS`].
    pub goods_name: String,
    /// Resolved unit or [`UNKNOWN_GOODS`].
    pub unit: String,
    /// Resolved supplier reference.
    pub supplier_id: Option<SupplierId>,
    /// Resolved supplier name or [`UNKNOWN_SUPPLIER`].
    pub supplier_name: String,
    /// Unit sale price.
    pub sale_price: Decimal,
    /// Unit cost price.
    pub cost_price: Decimal,
    /// Line totals.
    pub amounts: Amounts,
}

/// All lines of one supplier on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSection {
    /// Supplier reference, if resolved.
    pub supplier_id: Option<SupplierId>,
    /// Supplier name.
    pub supplier_name: String,
    /// Lines in transaction order.
    pub lines: Vec<ReportLine>,
    /// Section subtotal.
    pub totals: Amounts,
}

/// All supplier sections of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySection {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Supplier sections sorted by name.
    pub suppliers: Vec<SupplierSection>,
    /// Date total.
    pub totals: Amounts,
}

/// Report grouped date → supplier → lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedReport {
    /// Dates in ascending order.
    pub days: Vec<DaySection>,
    /// Grand total.
    pub totals: Amounts,
}

/// One supplier's lines on one date, for the supplier-first view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDay {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Lines in transaction order.
    pub lines: Vec<ReportLine>,
    /// Subtotal for the date.
    pub totals: Amounts,
}

/// Report regrouped supplier → date → lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierLedger {
    /// Supplier reference, if resolved.
    pub supplier_id: Option<SupplierId>,
    /// Supplier name.
    pub supplier_name: String,
    /// Dates in ascending order.
    pub days: Vec<SupplierDay>,
    /// Supplier grand total.
    pub totals: Amounts,
}

impl AggregatedReport {
    /// Returns true if the report has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of line items across all dates.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|day| &day.suppliers)
            .map(|section| section.lines.len())
            .sum()
    }

    /// Regroups the report by supplier, each with its own dates.
    ///
    /// Suppliers keep the same ordering as the day sections.
    #[must_use]
    pub fn supplier_ledgers(&self) -> Vec<SupplierLedger> {
        let mut ledgers: Vec<SupplierLedger> = Vec::new();

        for day in &self.days {
            for section in &day.suppliers {
                let day_entry = SupplierDay {
                    date: day.date,
                    lines: section.lines.clone(),
                    totals: section.totals,
                };
                match ledgers.iter_mut().find(|ledger| {
                    ledger.supplier_id == section.supplier_id
                        && ledger.supplier_name == section.supplier_name
                }) {
                    Some(ledger) => {
                        ledger.totals += section.totals;
                        ledger.days.push(day_entry);
                    }
                    None => ledgers.push(SupplierLedger {
                        supplier_id: section.supplier_id,
                        supplier_name: section.supplier_name.clone(),
                        days: vec![day_entry],
                        totals: section.totals,
                    }),
                }
            }
        }

        ledgers.sort_by(|a, b| {
            super::service::supplier_order(
                (a.supplier_name.as_str(), a.supplier_id),
                (b.supplier_name.as_str(), b.supplier_id),
            )
        });
        ledgers
    }
}

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const WEEKDAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];

/// Formats a date the way Indonesian documents print it, e.g. `05 Januari 2026`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Like [`long_date`] with the weekday, e.g. `Senin, 05 Januari 2026`.
#[must_use]
pub fn long_date_with_weekday(date: NaiveDate) -> String {
    format!(
        "{}, {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        long_date(date)
    )
}
