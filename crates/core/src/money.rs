//! Money amounts as stored in `NUMERIC(10,2)` columns.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Digits left of the decimal point a stored amount may carry.
pub const MAX_INTEGER_DIGITS: u32 = 8;

/// Decimal places kept by the store.
pub const SCALE: u32 = 2;

/// Reject amounts that are negative or would not fit the store's precision.
///
/// The amount is rounded to [`SCALE`] places first, the same way the store
/// rounds on insert.
pub fn validate_amount(field: &str, amount: Decimal) -> Result<Decimal, CoreError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {amount}"
        )));
    }
    let rounded = amount.round_dp(SCALE);
    if rounded >= Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS)) {
        return Err(CoreError::Validation(format!(
            "{field} is too large, got {amount}"
        )));
    }
    Ok(rounded)
}

/// [`validate_amount`] for optional fields.
pub fn validate_optional_amount(field: &str, amount: Option<Decimal>) -> Result<Option<Decimal>, CoreError> {
    amount.map(|a| validate_amount(field, a)).transpose()
}
