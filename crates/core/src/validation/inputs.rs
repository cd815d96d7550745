//! Create/update payloads sent to the API.

use chrono::NaiveDate;
use pasok_shared::types::{GoodsId, KitchenId, PeriodId, SupplierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::rules::{non_blank, non_negative, period_dates, positive};
use crate::domain::Role;

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    /// Login name.
    #[validate(custom(function = "non_blank"))]
    pub username: String,
    /// Password.
    #[validate(custom(function = "non_blank"))]
    pub password: String,
}

/// User create/update form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserInput {
    /// Login name.
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Display name.
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    /// Email address.
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password; omitted on update keeps the current one.
    #[validate(length(min = 6))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Role.
    pub role: Role,
    /// Whether the account can log in.
    pub is_active: bool,
}

/// Supplier (UD) create/update form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SupplierInput {
    /// Short code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Trading name.
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    /// Owner or contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Phone number.
    #[validate(length(min = 6, max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether the supplier is active.
    pub is_active: bool,
}

/// Kitchen (Dapur) create/update form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KitchenInput {
    /// Short code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Kitchen name.
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Person in charge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pic: Option<String>,
    /// Kiosk access code.
    #[validate(length(min = 4, max = 32))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    /// Whether the kitchen is active.
    pub is_active: bool,
}

/// Goods (Barang) create/update form; also the bulk upload row.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GoodsInput {
    /// Catalog code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Goods name.
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    /// Unit of measure.
    #[validate(custom(function = "non_blank"))]
    pub unit: String,
    /// Unit sale price.
    #[validate(custom(function = "non_negative"))]
    pub sale_price: Decimal,
    /// Unit cost price.
    #[validate(custom(function = "non_negative"))]
    pub cost_price: Decimal,
    /// Supplier that provides the goods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<SupplierId>,
    /// Whether the goods are sellable.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Period create/update form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "period_dates"))]
pub struct PeriodInput {
    /// Period name.
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Whether this becomes the active period.
    pub is_active: bool,
}

/// A line of a transaction form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItemInput {
    /// Goods reference.
    pub goods_id: GoodsId,
    /// Supplier override; the goods' supplier otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<SupplierId>,
    /// Quantity.
    #[validate(custom(function = "positive"))]
    pub quantity: Decimal,
    /// Unit sale price.
    #[validate(custom(function = "non_negative"))]
    pub sale_price: Decimal,
    /// Unit cost price.
    #[validate(custom(function = "non_negative"))]
    pub cost_price: Decimal,
}

/// Transaction create/update form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionInput {
    /// Receiving kitchen.
    pub kitchen_id: KitchenId,
    /// Period to record in.
    pub period_id: PeriodId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Line items.
    #[validate(length(min = 1, message = "at least one item is required"), nested)]
    pub items: Vec<LineItemInput>,
}
