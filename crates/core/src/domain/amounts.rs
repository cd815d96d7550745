//! Quantity and money totals shared by line items, groups and reports.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summed quantity, sale, cost and profit.
///
/// `profit` is always `sale - cost`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
    /// Total quantity.
    pub quantity: Decimal,
    /// Total sale value.
    pub sale: Decimal,
    /// Total cost value.
    pub cost: Decimal,
    /// Sale minus cost.
    pub profit: Decimal,
}

impl Amounts {
    /// Builds totals from a quantity and unit prices.
    #[must_use]
    pub fn priced(quantity: Decimal, sale_price: Decimal, cost_price: Decimal) -> Self {
        Self::from_parts(quantity, quantity * sale_price, quantity * cost_price)
    }

    /// Builds totals from already multiplied sale and cost values.
    #[must_use]
    pub fn from_parts(quantity: Decimal, sale: Decimal, cost: Decimal) -> Self {
        Self {
            quantity,
            sale,
            cost,
            profit: sale - cost,
        }
    }
}

impl Add for Amounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            quantity: self.quantity + rhs.quantity,
            sale: self.sale + rhs.sale,
            cost: self.cost + rhs.cost,
            profit: self.profit + rhs.profit,
        }
    }
}

impl AddAssign for Amounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Amounts> for Amounts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_priced_computes_profit() {
        let amounts = Amounts::priced(dec!(2), dec!(1000), dec!(800));
        assert_eq!(amounts.sale, dec!(2000));
        assert_eq!(amounts.cost, dec!(1600));
        assert_eq!(amounts.profit, dec!(400));
    }

    #[test]
    fn test_sum() {
        let total: Amounts = [
            Amounts::priced(dec!(2), dec!(1000), dec!(800)),
            Amounts::priced(dec!(1), dec!(500), dec!(450)),
        ]
        .iter()
        .sum();
        assert_eq!(total.quantity, dec!(3));
        assert_eq!(total.sale, dec!(2500));
        assert_eq!(total.profit, dec!(450));
    }
}
