//! Report aggregation service.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use pasok_shared::types::{GoodsId, SupplierId};

use super::error::ReportError;
use super::types::{
    AggregatedReport, DaySection, ReportFilter, ReportHeader, ReportLine, SupplierSection,
    UNKNOWN_GOODS, UNKNOWN_SUPPLIER,
};
use crate::domain::{Goods, Kitchen, LineItem, Period, Supplier, Transaction};

/// Lookup maps used to fill in names a line item does not carry.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    goods: HashMap<GoodsId, Goods>,
    suppliers: HashMap<SupplierId, Supplier>,
}

impl ReferenceIndex {
    /// Indexes goods and suppliers by id.
    #[must_use]
    pub fn new(goods: &[Goods], suppliers: &[Supplier]) -> Self {
        Self {
            goods: goods.iter().map(|g| (g.id, g.clone())).collect(),
            suppliers: suppliers.iter().map(|s| (s.id, s.clone())).collect(),
        }
    }

    /// Looks up goods.
    #[must_use]
    pub fn goods(&self, id: GoodsId) -> Option<&Goods> {
        self.goods.get(&id)
    }

    /// Looks up a supplier.
    #[must_use]
    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(&id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SupplierKey {
    Id(SupplierId),
    Name(String),
}

/// Ordering for supplier groups: case-insensitive name, then exact name, then id.
pub(crate) fn supplier_order(
    a: (&str, Option<SupplierId>),
    b: (&str, Option<SupplierId>),
) -> Ordering {
    a.0.to_lowercase()
        .cmp(&b.0.to_lowercase())
        .then_with(|| a.0.cmp(b.0))
        .then_with(|| a.1.cmp(&b.1))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Service for building the delivery report.
pub struct ReportService;

impl ReportService {
    /// Parses an IANA time zone name.
    pub fn parse_timezone(name: &str) -> Result<Tz, ReportError> {
        name.parse::<Tz>()
            .map_err(|_| ReportError::InvalidTimezone(name.to_string()))
    }

    /// Checks that a date filter falls inside the period.
    pub fn validate_filter(filter: &ReportFilter, period: &Period) -> Result<(), ReportError> {
        match filter.date {
            Some(date) if !period.contains_date(date) => Err(ReportError::DateOutsidePeriod {
                date,
                period: period.name.clone(),
                start: period.start_date,
                end: period.end_date,
            }),
            _ => Ok(()),
        }
    }

    /// Builds the header block for a report.
    #[must_use]
    pub fn header(
        business_name: &str,
        kitchen: &Kitchen,
        period: &Period,
        date: Option<NaiveDate>,
        generated_at: NaiveDateTime,
    ) -> ReportHeader {
        ReportHeader {
            business_name: business_name.to_string(),
            kitchen_name: kitchen.name.clone(),
            period_label: period.label(),
            date,
            generated_at,
        }
    }

    /// Resolves names for one line item.
    ///
    /// Denormalized fields on the item win; lookups fill the gaps; the
    /// placeholders fill whatever is left.
    #[must_use]
    pub fn enrich(
        transaction: &Transaction,
        date: NaiveDate,
        item: &LineItem,
        index: &ReferenceIndex,
    ) -> ReportLine {
        let goods = item.goods_id.and_then(|id| index.goods(id));
        let supplier_id = item
            .supplier_id
            .or_else(|| goods.and_then(|g| g.supplier_id));
        let supplier = supplier_id.and_then(|id| index.supplier(id));

        let goods_name = non_empty(item.goods_name.as_deref())
            .or_else(|| goods.map(|g| g.name.as_str()))
            .unwrap_or(UNKNOWN_GOODS)
            .to_string();
        let unit = non_empty(item.unit.as_deref())
            .or_else(|| goods.and_then(|g| non_empty(g.unit.as_deref())))
            .unwrap_or(UNKNOWN_GOODS)
            .to_string();
        let supplier_name = non_empty(item.supplier_name.as_deref())
            .or_else(|| supplier.map(|s| s.name.as_str()))
            .or_else(|| goods.and_then(|g| non_empty(g.supplier_name.as_deref())))
            .unwrap_or(UNKNOWN_SUPPLIER)
            .to_string();

        ReportLine {
            transaction_id: transaction.id,
            transaction_code: transaction.code.clone(),
            date,
            goods_id: item.goods_id,
            goods_name,
            unit,
            supplier_id,
            supplier_name,
            sale_price: item.sale_price,
            cost_price: item.cost_price,
            amounts: item.amounts(),
        }
    }

    /// Groups every line item by local date, then by supplier.
    ///
    /// Lines are never dropped: unresolved references land under the
    /// placeholder labels. Dates ascend; suppliers sort by name.
    #[must_use]
    pub fn aggregate(
        transactions: &[Transaction],
        index: &ReferenceIndex,
        tz: Tz,
    ) -> AggregatedReport {
        let mut days: BTreeMap<NaiveDate, HashMap<SupplierKey, SupplierSection>> = BTreeMap::new();

        for transaction in transactions {
            let date = transaction.date.local_date(tz);
            for item in &transaction.items {
                let line = Self::enrich(transaction, date, item, index);
                let key = match line.supplier_id {
                    Some(id) => SupplierKey::Id(id),
                    None => SupplierKey::Name(line.supplier_name.clone()),
                };

                let section = days
                    .entry(date)
                    .or_default()
                    .entry(key)
                    .or_insert_with(|| SupplierSection {
                        supplier_id: line.supplier_id,
                        supplier_name: line.supplier_name.clone(),
                        lines: Vec::new(),
                        totals: Default::default(),
                    });
                section.totals += line.amounts;
                section.lines.push(line);
            }
        }

        let days: Vec<DaySection> = days
            .into_iter()
            .map(|(date, sections)| {
                let mut suppliers: Vec<SupplierSection> = sections.into_values().collect();
                suppliers.sort_by(|a, b| {
                    supplier_order(
                        (a.supplier_name.as_str(), a.supplier_id),
                        (b.supplier_name.as_str(), b.supplier_id),
                    )
                });
                let totals = suppliers.iter().map(|s| s.totals).sum();
                DaySection {
                    date,
                    suppliers,
                    totals,
                }
            })
            .collect();

        let totals = days.iter().map(|d| d.totals).sum();
        AggregatedReport { days, totals }
    }

    /// Fails with [`ReportError::NoDataFound`] when there is nothing to render.
    pub fn ensure_not_empty(report: &AggregatedReport) -> Result<(), ReportError> {
        if report.is_empty() {
            return Err(ReportError::NoDataFound);
        }
        Ok(())
    }
}
