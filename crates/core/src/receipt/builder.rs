//! Splits a transaction into per-supplier receipts.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReceiptError;
use super::template::{TemplateKind, TemplateSelector};
use crate::domain::Transaction;
use crate::reports::{ReferenceIndex, ReportService};

/// One printed receipt row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Row number, starting at 1 per receipt.
    pub number: usize,
    /// Goods name.
    pub goods_name: String,
    /// Unit.
    pub unit: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price charged to the kitchen.
    pub price: Decimal,
    /// `quantity × price`, or the server subtotal.
    pub subtotal: Decimal,
}

/// A receipt for one supplier's share of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierReceipt {
    /// Template chosen from the supplier name.
    pub template: TemplateKind,
    /// Supplier name.
    pub supplier_name: String,
    /// Supplier address, when known.
    pub supplier_address: Option<String>,
    /// Supplier phone, when known.
    pub supplier_phone: Option<String>,
    /// Transaction code.
    pub transaction_code: String,
    /// Local transaction date.
    pub date: NaiveDate,
    /// Receiving kitchen.
    pub kitchen_name: String,
    /// Printed rows.
    pub lines: Vec<ReceiptLine>,
    /// Summed quantity.
    pub total_quantity: Decimal,
    /// Amount due.
    pub total: Decimal,
}

/// Builds receipts with a template selector and a local time zone.
#[derive(Debug, Clone)]
pub struct ReceiptBuilder {
    selector: TemplateSelector,
    tz: Tz,
}

impl ReceiptBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new(selector: TemplateSelector, tz: Tz) -> Self {
        Self { selector, tz }
    }

    /// Returns one receipt per supplier present in `transaction`, sorted by
    /// supplier name.
    pub fn build(
        &self,
        transaction: &Transaction,
        index: &ReferenceIndex,
        kitchen_name: Option<&str>,
    ) -> Result<Vec<SupplierReceipt>, ReceiptError> {
        if transaction.items.is_empty() {
            return Err(ReceiptError::EmptyTransaction(transaction.code.clone()));
        }

        let kitchen_name = kitchen_name
            .or(transaction.kitchen_name.as_deref())
            .unwrap_or("-")
            .to_string();
        let report =
            ReportService::aggregate(std::slice::from_ref(transaction), index, self.tz);

        let receipts = report
            .days
            .into_iter()
            .flat_map(|day| {
                day.suppliers
                    .into_iter()
                    .map(move |section| (day.date, section))
            })
            .map(|(date, section)| {
                let supplier = section.supplier_id.and_then(|id| index.supplier(id));
                let lines = section
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| ReceiptLine {
                        number: i + 1,
                        goods_name: line.goods_name.clone(),
                        unit: line.unit.clone(),
                        quantity: line.amounts.quantity,
                        price: line.sale_price,
                        subtotal: line.amounts.sale,
                    })
                    .collect();

                SupplierReceipt {
                    template: self.selector.select(&section.supplier_name),
                    supplier_address: supplier.and_then(|s| s.address.clone()),
                    supplier_phone: supplier.and_then(|s| s.phone.clone()),
                    supplier_name: section.supplier_name,
                    transaction_code: transaction.code.clone(),
                    date,
                    kitchen_name: kitchen_name.clone(),
                    lines,
                    total_quantity: section.totals.quantity,
                    total: section.totals.sale,
                }
            })
            .collect();

        Ok(receipts)
    }
}
