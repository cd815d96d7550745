use chrono::NaiveDate;
use pasok_shared::AppError;
use pasok_shared::types::{GoodsId, KitchenId, PeriodId};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn goods(name: &str, sale: Decimal, cost: Decimal) -> GoodsInput {
    GoodsInput {
        code: Some("BRG-001".to_string()),
        name: name.to_string(),
        unit: "kg".to_string(),
        sale_price: sale,
        cost_price: cost,
        supplier_id: None,
        is_active: true,
    }
}

fn line(quantity: Decimal) -> LineItemInput {
    LineItemInput {
        goods_id: GoodsId(1),
        supplier_id: None,
        quantity,
        sale_price: dec!(1000),
        cost_price: dec!(800),
    }
}

#[test]
fn test_valid_goods_passes() {
    assert!(validate_input(&goods("Beras", dec!(14500), dec!(13000))).is_ok());
}

#[rstest]
#[case("   ", dec!(1000), dec!(900))]
#[case("Beras", dec!(-1), dec!(900))]
#[case("Beras", dec!(1000), dec!(-0.5))]
fn test_invalid_goods_rejected(#[case] name: &str, #[case] sale: Decimal, #[case] cost: Decimal) {
    let result = validate_input(&goods(name, sale, cost));
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_period_date_order() {
    let mut input = PeriodInput {
        name: "Januari 2026".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        is_active: true,
    };
    let error = validate_input(&input).unwrap_err();
    assert!(error.message().contains("start date must not be after end date"));

    input.end_date = input.start_date;
    assert!(validate_input(&input).is_ok());
}

#[test]
fn test_transaction_requires_items() {
    let mut input = TransactionInput {
        kitchen_id: KitchenId(1),
        period_id: PeriodId(1),
        date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        notes: None,
        items: vec![],
    };
    assert!(validate_input(&input).is_err());

    input.items.push(line(dec!(2)));
    assert!(validate_input(&input).is_ok());
}

#[test]
fn test_transaction_rejects_zero_quantity_line() {
    let input = TransactionInput {
        kitchen_id: KitchenId(1),
        period_id: PeriodId(1),
        date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        notes: None,
        items: vec![line(dec!(1)), line(Decimal::ZERO)],
    };
    assert!(validate_input(&input).is_err());
}

#[test]
fn test_login_requires_both_fields() {
    let input = LoginInput {
        username: "admin".to_string(),
        password: String::new(),
    };
    assert!(validate_input(&input).is_err());
}
