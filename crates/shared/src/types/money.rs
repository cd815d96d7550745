//! Rupiah amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts stay `rust_decimal::Decimal` until they are printed.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a number with Indonesian grouping (`.` thousands, `,` decimals).
///
/// Integral values print without a fractional part; others keep two places.
#[must_use]
pub fn format_number(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();
    let integral = abs.trunc();
    let fraction = (abs - integral).normalize();

    let digits = integral.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_zero() {
        let cents = (fraction * Decimal::ONE_HUNDRED).trunc().to_string();
        out.push_str(&format!(",{cents:0>2}"));
    }
    out
}

/// Formats an amount as rupiah, e.g. `Rp 1.250.000`.
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let number = format_number(amount);
    match number.strip_prefix('-') {
        Some(rest) => format!("-Rp {rest}"),
        None => format!("Rp {number}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "0")]
    #[case(dec!(500), "500")]
    #[case(dec!(2500), "2.500")]
    #[case(dec!(1250000), "1.250.000")]
    #[case(dec!(1234.5), "1.234,50")]
    #[case(dec!(-98000), "-98.000")]
    #[case(dec!(10.005), "10,01")]
    fn test_format_number(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_number(amount), expected);
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(dec!(2500)), "Rp 2.500");
        assert_eq!(format_rupiah(dec!(-1500)), "-Rp 1.500");
    }
}
