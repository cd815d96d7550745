//! Plain-text output.

use anyhow::Result;
use pasok_core::bulk::BulkSummary;
use pasok_core::domain::{ActivityLog, Goods, Kitchen, Period, Supplier, Transaction, User};
use pasok_shared::types::{PageMeta, format_number, format_rupiah};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

fn status(active: bool) -> &'static str {
    if active { "aktif" } else { "nonaktif" }
}

/// Rows that print as one line each.
pub trait Row {
    fn line(&self) -> String;
}

impl Row for User {
    fn line(&self) -> String {
        format!(
            "#{} {} ({}) • {} • {}",
            self.id,
            self.username,
            self.display_name(),
            self.role,
            status(self.is_active)
        )
    }
}

impl Row for Supplier {
    fn line(&self) -> String {
        format!(
            "#{} [{}] {} • {} • {}",
            self.id,
            or_dash(self.code.as_deref()),
            self.name,
            or_dash(self.phone.as_deref()),
            status(self.is_active)
        )
    }
}

impl Row for Kitchen {
    fn line(&self) -> String {
        format!(
            "#{} [{}] {} • PIC {} • {}",
            self.id,
            or_dash(self.code.as_deref()),
            self.name,
            or_dash(self.pic.as_deref()),
            status(self.is_active)
        )
    }
}

impl Row for Goods {
    fn line(&self) -> String {
        format!(
            "#{} [{}] {} / {} • jual {} • modal {} • {}",
            self.id,
            or_dash(self.code.as_deref()),
            self.name,
            or_dash(self.unit.as_deref()),
            format_rupiah(self.sale_price),
            format_rupiah(self.cost_price),
            or_dash(self.supplier_name.as_deref())
        )
    }
}

impl Row for Period {
    fn line(&self) -> String {
        let state = if self.is_closed {
            "ditutup"
        } else if self.is_active {
            "aktif"
        } else {
            "terbuka"
        };
        format!("#{} {} • {}", self.id, self.label(), state)
    }
}

impl Row for Transaction {
    fn line(&self) -> String {
        let totals = self.totals();
        format!(
            "#{} {} • {} • {} • {} • jual {} • laba {}",
            self.id,
            self.code,
            self.date,
            or_dash(self.kitchen_name.as_deref()),
            self.status,
            format_rupiah(totals.sale),
            format_rupiah(totals.profit)
        )
    }
}

impl Row for ActivityLog {
    fn line(&self) -> String {
        format!(
            "{} • {} • {}/{} • {}",
            self.created_at.format("%d/%m/%Y %H:%M"),
            or_dash(self.user_name.as_deref()),
            self.module,
            self.action,
            or_dash(self.description.as_deref())
        )
    }
}

pub fn rows<T: Row>(items: &[T]) {
    if items.is_empty() {
        println!("(no data)");
    }
    for item in items {
        println!("- {}", item.line());
    }
}

pub fn page_footer(meta: &PageMeta) {
    println!(
        "page {} of {} • {} total",
        meta.page,
        meta.total_pages.max(1),
        meta.total
    );
}

pub fn transaction_detail(transaction: &Transaction) {
    println!("{}", transaction.line());
    if let Some(notes) = &transaction.notes {
        println!("  notes: {notes}");
    }
    for (i, item) in transaction.items.iter().enumerate() {
        let amounts = item.amounts();
        println!(
            "  {}. {} • {} {} × {} = {} ({})",
            i + 1,
            or_dash(item.goods_name.as_deref()),
            format_number(item.quantity),
            or_dash(item.unit.as_deref()),
            format_number(item.sale_price),
            format_rupiah(amounts.sale),
            or_dash(item.supplier_name.as_deref())
        );
    }
}

pub fn bulk_summary(summary: &BulkSummary) {
    println!("{}", summary.headline());
    for failure in &summary.failures {
        println!("  row {} ({}): {}", failure.row, failure.label, failure.reason);
    }
}
