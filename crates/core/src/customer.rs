//! Customer identity: gov-ID normalization, guest-name splitting, and the
//! customer-reference rules used at booking time.
//!
//! Customers are global (not hotel-scoped) and deduplicated by normalized
//! government ID. The directory owns normalization: every lookup and every
//! insert goes through [`normalize_gov_id`].
//!
//! Repeat sightings never update contact details of an existing customer.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Rating assigned to a newly created customer and reported for customers
/// whose stored average is absent.
pub const DEFAULT_CUSTOMER_RATING: f64 = 5.0;

/// Normalize a government ID: trim surrounding whitespace and uppercase.
///
/// Rejects IDs that are empty after trimming.
pub fn normalize_gov_id(raw: &str) -> Result<String, CoreError> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(CoreError::Validation(
            "Government ID must not be empty".to_string(),
        ));
    }
    Ok(normalized)
}

/// Split a full name on the first space into `(first, rest)`.
///
/// A single token yields an empty last name.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Booking-time customer references
// ---------------------------------------------------------------------------

/// Raw guest fields as they arrive on a booking or registration request.
#[derive(Debug, Clone, Default)]
pub struct GuestInput {
    pub name: Option<String>,
    pub gov_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// A validated, normalized guest ready to be looked up or created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    /// Normalized (trimmed, uppercased) government ID.
    pub gov_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl NewGuest {
    /// Validate guest fields. Both a name and a government ID are required.
    pub fn from_input(input: GuestInput) -> Result<Self, CoreError> {
        let name = non_blank(input.name);
        let gov_id = non_blank(input.gov_id);
        let (Some(name), Some(gov_id)) = (name, gov_id) else {
            return Err(CoreError::Validation(
                "Guest name and government ID are required".to_string(),
            ));
        };
        let (first_name, last_name) = split_full_name(&name);
        Ok(Self {
            gov_id: normalize_gov_id(&gov_id)?,
            first_name,
            last_name,
            phone: non_blank(input.phone),
            address: non_blank(input.address),
            city: non_blank(input.city),
            state: non_blank(input.state),
            zip_code: non_blank(input.zip_code),
        })
    }
}

/// How a booking identifies its customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    /// An explicit customer id, trusted as-is.
    Existing(DbId),
    /// Guest details to look up by gov ID, creating the customer if unseen.
    Guest(NewGuest),
}

impl CustomerRef {
    /// Pick the customer reference from a request. An explicit (positive)
    /// id wins; otherwise guest name and gov ID are both required.
    pub fn from_request(customer_id: Option<DbId>, guest: GuestInput) -> Result<Self, CoreError> {
        if let Some(id) = customer_id.filter(|id| *id > 0) {
            return Ok(Self::Existing(id));
        }
        NewGuest::from_input(guest).map(Self::Guest).map_err(|_| {
            CoreError::Validation(
                "Either customer_id or guest details (name, government ID) are required"
                    .to_string(),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Lookup insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    New,
    Returning,
}

impl GuestStatus {
    pub fn from_stay_count(stays: i64) -> Self {
        if stays > 0 {
            Self::Returning
        } else {
            Self::New
        }
    }
}

/// Rating reported on lookup: the stored rolling average, or the default.
pub fn reported_rating(stored_average: Option<f64>) -> f64 {
    stored_average.unwrap_or(DEFAULT_CUSTOMER_RATING)
}
