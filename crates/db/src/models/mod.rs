//! Row models and insert/update DTOs, one module per table.

pub mod booking;
pub mod customer;
pub mod feedback;
pub mod hotel;
pub mod room;
pub mod user;
