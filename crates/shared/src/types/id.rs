//! Typed IDs for type-safe entity references.
//!
//! The back-office API numbers every record with an integer key. Wrapping it
//! prevents passing a `SupplierId` where a `GoodsId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(SupplierId, "Unique identifier for a supplier (UD).");
typed_id!(KitchenId, "Unique identifier for a kitchen (Dapur).");
typed_id!(GoodsId, "Unique identifier for a goods catalog entry (Barang).");
typed_id!(PeriodId, "Unique identifier for an operational period.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(LineItemId, "Unique identifier for a transaction line item.");
typed_id!(ActivityLogId, "Unique identifier for an activity log entry.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_display() {
        assert_eq!(SupplierId::new(42).to_string(), "42");
    }

    #[test]
    fn test_typed_id_from_str() {
        assert_eq!(KitchenId::from_str(" 7 ").unwrap(), KitchenId(7));
        assert!(KitchenId::from_str("dapur").is_err());
    }

    #[test]
    fn test_typed_id_is_transparent() {
        let id: GoodsId = serde_json::from_str("15").unwrap();
        assert_eq!(id.into_inner(), 15);
        assert_eq!(serde_json::to_string(&id).unwrap(), "15");
    }
}
