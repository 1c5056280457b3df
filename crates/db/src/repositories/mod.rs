//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any `PgExecutor` as the first argument: `&PgPool` for standalone
//! reads, or `uow.conn()` inside a [`crate::UnitOfWork`].

pub mod booking_repo;
pub mod customer_repo;
pub mod feedback_repo;
pub mod hotel_repo;
pub mod room_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use customer_repo::CustomerRepo;
pub use feedback_repo::FeedbackRepo;
pub use hotel_repo::HotelRepo;
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;
