//! Domain rules for the innkeep property-management backend.
//!
//! Everything here is pure: no database, no HTTP. The `db` crate persists
//! what these modules describe and the `api` crate's engine enforces them
//! inside a unit of work.

pub mod availability;
pub mod billing;
pub mod booking;
pub mod customer;
pub mod error;
pub mod feedback;
pub mod money;
pub mod identity;
pub mod pagination;
pub mod registration;
pub mod room;
pub mod types;
