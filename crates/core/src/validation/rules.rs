//! Custom validation rules.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

use super::inputs::PeriodInput;

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(failure("blank", "must not be blank"));
    }
    Ok(())
}

pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(failure("negative", "must not be negative"));
    }
    Ok(())
}

pub(crate) fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(failure("not_positive", "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn period_dates(input: &PeriodInput) -> Result<(), ValidationError> {
    if input.start_date > input.end_date {
        return Err(failure(
            "date_order",
            "start date must not be after end date",
        ));
    }
    Ok(())
}
