//! Form validation for create/update inputs.
//!
//! The server owns every invariant; these checks only stop obviously broken
//! input (blank required fields, negative prices, reversed date ranges)
//! before a request is sent.

pub mod inputs;
mod rules;

pub use inputs::{
    GoodsInput, KitchenInput, LineItemInput, LoginInput, PeriodInput, SupplierInput,
    TransactionInput, UserInput,
};

use pasok_shared::{AppError, AppResult};
use validator::Validate;

/// Validates an input, mapping failures to `AppError::Validation`.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|errors| AppError::Validation(errors.to_string()))
}

#[cfg(test)]
mod tests;
