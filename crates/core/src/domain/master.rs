//! Master records: suppliers (UD), kitchens (Dapur) and goods (Barang).

use pasok_shared::types::{GoodsId, KitchenId, SupplierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn active_by_default() -> bool {
    true
}

/// A registered small-trade supplier ("Usaha Dagang").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique identifier.
    pub id: SupplierId,
    /// Short code printed on documents.
    #[serde(default)]
    pub code: Option<String>,
    /// Trading name.
    pub name: String,
    /// Owner or contact person.
    #[serde(default)]
    pub owner: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the supplier can receive new transactions.
    #[serde(default = "active_by_default", alias = "active")]
    pub is_active: bool,
}

/// A kitchen, the receiving site for goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kitchen {
    /// Unique identifier.
    pub id: KitchenId,
    /// Short code.
    #[serde(default)]
    pub code: Option<String>,
    /// Kitchen name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Person in charge.
    #[serde(default)]
    pub pic: Option<String>,
    /// Code that unlocks the kiosk goods listing.
    #[serde(default)]
    pub access_code: Option<String>,
    /// Whether the kitchen is in service.
    #[serde(default = "active_by_default", alias = "active")]
    pub is_active: bool,
}

/// A goods catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goods {
    /// Unique identifier.
    pub id: GoodsId,
    /// Catalog code.
    #[serde(default)]
    pub code: Option<String>,
    /// Goods name.
    pub name: String,
    /// Unit of measure (kg, ikat, pcs, ...).
    #[serde(default)]
    pub unit: Option<String>,
    /// Unit sale price.
    #[serde(default)]
    pub sale_price: Decimal,
    /// Unit cost price.
    #[serde(default)]
    pub cost_price: Decimal,
    /// Supplier that provides the goods.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    /// Denormalized supplier name.
    #[serde(default)]
    pub supplier_name: Option<String>,
    /// Whether the goods can be sold.
    #[serde(default = "active_by_default", alias = "active")]
    pub is_active: bool,
}

impl Goods {
    /// Margin per unit.
    #[must_use]
    pub fn unit_margin(&self) -> Decimal {
        self.sale_price - self.cost_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_goods_deserializes_string_prices() {
        let goods: Goods = serde_json::from_value(json!({
            "id": 3,
            "name": "Beras Premium",
            "unit": "kg",
            "sale_price": "14500.00",
            "cost_price": 13000,
            "supplier_id": 2
        }))
        .unwrap();

        assert_eq!(goods.sale_price, dec!(14500));
        assert_eq!(goods.unit_margin(), dec!(1500));
        assert_eq!(goods.supplier_id, Some(SupplierId(2)));
        assert!(goods.is_active);
    }

    #[test]
    fn test_supplier_accepts_active_alias() {
        let supplier: Supplier = serde_json::from_value(json!({
            "id": 1,
            "name": "UD Sumber Rejeki",
            "active": false
        }))
        .unwrap();
        assert!(!supplier.is_active);
    }
}
