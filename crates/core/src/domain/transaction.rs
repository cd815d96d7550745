//! Sales transactions and their line items.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use pasok_shared::types::{GoodsId, KitchenId, LineItemId, PeriodId, SupplierId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amounts::Amounts;

/// Transaction status. Only drafts can move, and only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Transaction is being drafted.
    Draft,
    /// Transaction has been completed and counts toward reports.
    Completed,
    /// Transaction has been cancelled.
    Cancelled,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown transaction status: {s}")),
        }
    }
}

/// A transaction date as sent by the server.
///
/// Some endpoints send a plain calendar date, others a full instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BusinessDate {
    /// A calendar date (`YYYY-MM-DD`).
    Day(NaiveDate),
    /// An RFC 3339 instant.
    Instant(DateTime<Utc>),
}

impl BusinessDate {
    /// Truncates to the calendar date observed in `tz`.
    #[must_use]
    pub fn local_date(&self, tz: Tz) -> NaiveDate {
        match self {
            Self::Day(date) => *date,
            Self::Instant(instant) => instant.with_timezone(&tz).date_naive(),
        }
    }
}

impl std::fmt::Display for BusinessDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Instant(instant) => write!(f, "{}", instant.to_rfc3339()),
        }
    }
}

impl From<NaiveDate> for BusinessDate {
    fn from(date: NaiveDate) -> Self {
        Self::Day(date)
    }
}

/// One goods line within a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line identifier.
    #[serde(default)]
    pub id: Option<LineItemId>,
    /// Goods reference.
    #[serde(default)]
    pub goods_id: Option<GoodsId>,
    /// Supplier reference.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    /// Denormalized goods name.
    #[serde(default)]
    pub goods_name: Option<String>,
    /// Denormalized supplier name.
    #[serde(default)]
    pub supplier_name: Option<String>,
    /// Denormalized unit.
    #[serde(default)]
    pub unit: Option<String>,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Unit sale price.
    pub sale_price: Decimal,
    /// Unit cost price.
    pub cost_price: Decimal,
    /// Server-computed sale subtotal.
    #[serde(default)]
    pub subtotal_sale: Option<Decimal>,
    /// Server-computed cost subtotal.
    #[serde(default)]
    pub subtotal_cost: Option<Decimal>,
}

impl LineItem {
    /// Line totals; server subtotals win when present.
    #[must_use]
    pub fn amounts(&self) -> Amounts {
        let sale = self
            .subtotal_sale
            .unwrap_or(self.quantity * self.sale_price);
        let cost = self
            .subtotal_cost
            .unwrap_or(self.quantity * self.cost_price);
        Amounts::from_parts(self.quantity, sale, cost)
    }
}

/// A sales transaction from a supplier set to a kitchen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Transaction code (e.g., "TRX-20260105-001").
    pub code: String,
    /// Transaction date.
    pub date: BusinessDate,
    /// Receiving kitchen.
    pub kitchen_id: KitchenId,
    /// Denormalized kitchen name.
    #[serde(default)]
    pub kitchen_name: Option<String>,
    /// Period the transaction is recorded in.
    pub period_id: PeriodId,
    /// Denormalized period name.
    #[serde(default)]
    pub period_name: Option<String>,
    /// Current status.
    pub status: TransactionStatus,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Line items (populated by the detail endpoint).
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Server-computed sale total.
    #[serde(default)]
    pub total_sale: Option<Decimal>,
    /// Server-computed cost total.
    #[serde(default)]
    pub total_cost: Option<Decimal>,
}

impl Transaction {
    /// Returns true if the transaction can still be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status == TransactionStatus::Draft
    }

    /// Returns true if the transaction can be completed.
    #[must_use]
    pub fn can_complete(&self) -> bool {
        self.status == TransactionStatus::Draft && !self.items.is_empty()
    }

    /// Returns true if the transaction can be cancelled.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        self.status == TransactionStatus::Draft
    }

    /// Sum of the line items.
    #[must_use]
    pub fn item_totals(&self) -> Amounts {
        self.items.iter().map(LineItem::amounts).sum()
    }

    /// Transaction totals.
    ///
    /// List endpoints omit line items, so the server totals stand in until
    /// the detail has been fetched.
    #[must_use]
    pub fn totals(&self) -> Amounts {
        match (self.items.is_empty(), self.total_sale, self.total_cost) {
            (true, Some(sale), Some(cost)) => Amounts::from_parts(Decimal::ZERO, sale, cost),
            _ => self.item_totals(),
        }
    }
}
