//! Shared fixtures for renderer tests.

use chrono::NaiveDate;
use pasok_core::domain::{BusinessDate, LineItem, Transaction, TransactionStatus};
use pasok_core::reports::{AggregatedReport, ReferenceIndex, ReportHeader, ReportService};
use pasok_shared::types::{GoodsId, KitchenId, PeriodId, SupplierId, TransactionId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) const LONG_SUPPLIER: &str = "Koperasi Tani Makmur Sejahtera [Lembang] Bandung";

pub(crate) fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

pub(crate) fn item(goods: &str, supplier_id: i64, supplier: &str, qty: Decimal, price: Decimal) -> LineItem {
    LineItem {
        id: None,
        goods_id: Some(GoodsId(1)),
        supplier_id: Some(SupplierId(supplier_id)),
        goods_name: Some(goods.to_string()),
        supplier_name: Some(supplier.to_string()),
        unit: Some("kg".to_string()),
        quantity: qty,
        sale_price: price,
        cost_price: price * dec!(0.8),
        subtotal_sale: None,
        subtotal_cost: None,
    }
}

pub(crate) fn transaction(id: i64, date: NaiveDate, items: Vec<LineItem>) -> Transaction {
    Transaction {
        id: TransactionId(id),
        code: format!("TRX-{id:03}"),
        date: BusinessDate::Day(date),
        kitchen_id: KitchenId(1),
        kitchen_name: Some("Dapur Utama".to_string()),
        period_id: PeriodId(1),
        period_name: Some("Januari 2026".to_string()),
        status: TransactionStatus::Completed,
        notes: None,
        items,
        total_sale: None,
        total_cost: None,
    }
}

pub(crate) fn header() -> ReportHeader {
    ReportHeader {
        business_name: "Pasok".to_string(),
        kitchen_name: "Dapur Utama".to_string(),
        period_label: "Januari 2026 (01/01/2026 - 31/01/2026)".to_string(),
        date: None,
        generated_at: day(31).and_hms_opt(14, 5, 9).unwrap(),
    }
}

pub(crate) fn aggregate(transactions: &[Transaction]) -> AggregatedReport {
    ReportService::aggregate(
        transactions,
        &ReferenceIndex::default(),
        chrono_tz::Asia::Jakarta,
    )
}

/// Two suppliers over two days.
pub(crate) fn sample_report() -> (ReportHeader, AggregatedReport) {
    let transactions = vec![
        transaction(
            1,
            day(5),
            vec![
                item("Beras", 1, "UD Sumber Rejeki", dec!(2), dec!(1000)),
                item("Wortel", 2, LONG_SUPPLIER, dec!(1), dec!(500)),
            ],
        ),
        transaction(
            2,
            day(6),
            vec![item("Gula", 1, "UD Sumber Rejeki", dec!(3), dec!(15000))],
        ),
    ];
    (header(), aggregate(&transactions))
}

/// One day with `lines` rows, enough to spill onto further pages.
pub(crate) fn long_report(lines: usize) -> (ReportHeader, AggregatedReport) {
    let items = (0..lines)
        .map(|i| {
            let supplier = i64::try_from(i % 3).unwrap() + 1;
            item(
                &format!("Barang {i}"),
                supplier,
                &format!("UD Pemasok {supplier}"),
                dec!(1),
                dec!(2500),
            )
        })
        .collect();
    (header(), aggregate(&[transaction(1, day(5), items)]))
}
