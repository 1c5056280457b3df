//! Shared query parameter types for API handlers.

use innkeep_core::types::Timestamp;
use serde::Deserialize;

/// Pagination parameters (`?limit=&offset=`). Clamped by the engine via
/// `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A requested stay window (`?check_in_at=&expected_check_out_at=`).
#[derive(Debug, Deserialize)]
pub struct StayWindowParams {
    pub check_in_at: Timestamp,
    pub expected_check_out_at: Timestamp,
}

/// `?gov_id=` for customer lookup.
#[derive(Debug, Deserialize)]
pub struct GovIdParams {
    pub gov_id: String,
}
