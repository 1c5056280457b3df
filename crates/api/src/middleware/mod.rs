//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user and their hotel.

pub mod auth;
