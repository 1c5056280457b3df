//! Checkout feedback rating bounds.

use crate::error::CoreError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 10;

/// Reject ratings outside `[MIN_RATING, MAX_RATING]`.
pub fn validate_rating(rating: i16) -> Result<i16, CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}
