//! Booking lifecycle status and its state machine.
//!
//! `Active -> Completed` is the only transition. Completed is terminal and
//! bookings are never deleted. Cancellation and no-show are not modelled.

use crate::error::CoreError;

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_COMPLETED: &str = "Completed";

/// All status strings accepted by the `bookings.status` check constraint.
pub const VALID_STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_COMPLETED];

/// Default number of guests when a booking request omits it.
pub const DEFAULT_NUM_GUESTS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Active,
    Completed,
}

impl BookingStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Completed => STATUS_COMPLETED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_COMPLETED => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown booking status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Statuses reachable from `from`.
pub fn valid_transitions(from: BookingStatus) -> &'static [BookingStatus] {
    match from {
        BookingStatus::Active => &[BookingStatus::Completed],
        BookingStatus::Completed => &[],
    }
}

pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a state transition, returning a validation error for invalid ones.
pub fn validate_transition(from: BookingStatus, to: BookingStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid booking transition: {} -> {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Status a new booking starts in. Callers may only pick `Active`; a booking
/// cannot be created already closed.
pub fn initial_status(requested: Option<&str>) -> Result<BookingStatus, CoreError> {
    match requested {
        None => Ok(BookingStatus::Active),
        Some(s) => match BookingStatus::parse(s)? {
            BookingStatus::Active => Ok(BookingStatus::Active),
            other => Err(CoreError::Validation(format!(
                "New bookings must start Active, got '{}'",
                other.as_str()
            ))),
        },
    }
}

/// Status an Active booking moves to at checkout.
pub fn checkout_status(requested: Option<&str>) -> Result<BookingStatus, CoreError> {
    let target = match requested {
        None => BookingStatus::Completed,
        Some(s) => BookingStatus::parse(s)?,
    };
    validate_transition(BookingStatus::Active, target)?;
    Ok(target)
}
