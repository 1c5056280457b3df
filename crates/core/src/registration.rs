//! Hotel registration rules: layout validation and address composition.
//!
//! A registration carries the hotel's floor plan. Every room number in the
//! plan becomes a `rooms` row, so duplicates are rejected here, before any
//! write, with the offending numbers listed.

use std::collections::{BTreeSet, HashSet};

use crate::error::CoreError;

/// Terms stored on a newly registered hotel.
pub const DEFAULT_TERMS: &str = "Standard Terms Applied.";

/// Check the room numbers of a submitted layout and return them trimmed,
/// in submission order.
///
/// Returns `Validation` for an empty number and `Conflict` listing every
/// number that appears more than once.
pub fn validate_room_numbers<'a>(
    numbers: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<String>, CoreError> {
    let trimmed: Vec<String> = numbers.into_iter().map(|n| n.trim().to_string()).collect();

    if trimmed.iter().any(|n| n.is_empty()) {
        return Err(CoreError::Validation(
            "Room number must not be empty".to_string(),
        ));
    }

    let duplicates: Vec<&str> = find_duplicates(&trimmed).into_iter().collect();
    if !duplicates.is_empty() {
        return Err(CoreError::Conflict(format!(
            "Duplicate room numbers in layout: {}",
            duplicates.join(", ")
        )));
    }

    Ok(trimmed)
}

/// Numbers that occur more than once, sorted.
pub fn find_duplicates(numbers: &[String]) -> BTreeSet<&str> {
    let mut seen = HashSet::new();
    numbers
        .iter()
        .map(String::as_str)
        .filter(|n| !seen.insert(*n))
        .collect()
}

/// `"street, city, state zip, country"`.
pub fn compose_address(street: &str, city: &str, state: &str, zip: &str, country: &str) -> String {
    format!(
        "{}, {}, {} {}, {}",
        street.trim(),
        city.trim(),
        state.trim(),
        zip.trim(),
        country.trim()
    )
}
