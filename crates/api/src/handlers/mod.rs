pub mod auth;
pub mod billing;
pub mod bookings;
pub mod customers;
pub mod hotel;
pub mod operations;
pub mod rooms;
pub mod users;
