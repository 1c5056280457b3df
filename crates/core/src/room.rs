//! Room status flag and room-reference parsing.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_AVAILABLE: &str = "Available";
pub const STATUS_OCCUPIED: &str = "Occupied";
pub const STATUS_DIRTY: &str = "Dirty";
pub const STATUS_MAINTENANCE: &str = "Maintenance";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_AVAILABLE,
    STATUS_OCCUPIED,
    STATUS_DIRTY,
    STATUS_MAINTENANCE,
];

/// Housekeeping flag on a room. Independent of bookings: availability for a
/// date range is decided by the overlap predicate alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    Occupied,
    Dirty,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => STATUS_AVAILABLE,
            Self::Occupied => STATUS_OCCUPIED,
            Self::Dirty => STATUS_DIRTY,
            Self::Maintenance => STATUS_MAINTENANCE,
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_AVAILABLE => Ok(Self::Available),
            STATUS_OCCUPIED => Ok(Self::Occupied),
            STATUS_DIRTY => Ok(Self::Dirty),
            STATUS_MAINTENANCE => Ok(Self::Maintenance),
            other => Err(CoreError::Validation(format!(
                "Unknown room status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Room references
// ---------------------------------------------------------------------------

/// A caller-supplied room identifier: either a database id or a room number.
///
/// `"12"` is ambiguous (id 12 or room number "12"); resolution tries the id
/// first and falls back to the number, always scoped to the caller's hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRef {
    raw: String,
    id: Option<DbId>,
}

impl RoomRef {
    /// Parse a reference. Surrounding whitespace is ignored; empty input is
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(CoreError::Validation(
                "Room reference must not be empty".to_string(),
            ));
        }
        Ok(Self {
            raw: raw.to_string(),
            id: raw.parse::<DbId>().ok().filter(|id| *id > 0),
        })
    }

    /// A reference that is known to be a database id.
    pub fn from_id(id: DbId) -> Self {
        Self {
            raw: id.to_string(),
            id: Some(id),
        }
    }

    /// The id interpretation, if the reference is a positive integer.
    pub fn as_id(&self) -> Option<DbId> {
        self.id
    }

    /// The room-number interpretation (always available).
    pub fn as_number(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for RoomRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
