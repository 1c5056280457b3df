//! The booking engine: every tenant-facing operation as a function over a
//! database connection or a [`UnitOfWork`](innkeep_db::UnitOfWork).
//!
//! Operations that write take `&mut UnitOfWork` and never commit; the caller
//! commits once the operation returns `Ok`. Read-only operations take
//! `&mut PgConnection`. Every operation receives an already-authenticated
//! [`Actor`] and scopes its reads and writes to `actor.hotel_id`.
//!
//! - [`rooms`] -- room resolution, inventory, availability
//! - [`booking`] -- create booking, check-in
//! - [`checkout`] -- check-out with optional feedback
//! - [`customers`] -- customer directory (resolve, register, lookup)
//! - [`history`] -- cross-hotel customer history
//! - [`registration`] -- hotel onboarding
//! - [`billing`] -- subscription extension
//! - [`identity`] -- login, users, password reset, hotel profile

use innkeep_core::error::CoreError;
use innkeep_core::types::DbId;

pub mod billing;
pub mod booking;
pub mod checkout;
pub mod customers;
pub mod history;
pub mod identity;
pub mod registration;
pub mod rooms;

/// The authenticated `{user_id, hotel_id}` pair an operation acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub hotel_id: DbId,
}

impl Actor {
    /// `Forbidden` unless `hotel_id` is the actor's own hotel.
    pub fn ensure_hotel(&self, entity: &str, hotel_id: DbId) -> Result<(), CoreError> {
        if hotel_id == self.hotel_id {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "{entity} belongs to another hotel"
            )))
        }
    }
}
