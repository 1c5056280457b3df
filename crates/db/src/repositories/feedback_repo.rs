//! Repository for the `customer_feedback` table.

use innkeep_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::feedback::{CreateFeedback, Feedback};

const COLUMNS: &str = "id, booking_id, customer_id, hotel_id, rating, notes, created_at, updated_at";

pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert feedback for a booking. Fails with
    /// `uq_customer_feedback_booking` if the booking already has one.
    pub async fn create<'e>(db: impl PgExecutor<'e>, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_feedback (booking_id, customer_id, hotel_id, rating, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.booking_id)
            .bind(input.customer_id)
            .bind(input.hotel_id)
            .bind(input.rating)
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_booking<'e>(
        db: impl PgExecutor<'e>,
        booking_id: DbId,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customer_feedback WHERE booking_id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(booking_id)
            .fetch_optional(db)
            .await
    }

    /// All of a customer's feedback across every hotel, newest first.
    pub async fn list_for_customer<'e>(
        db: impl PgExecutor<'e>,
        customer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_feedback
             WHERE customer_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await
    }

    /// Global average rating, `None` when the customer has no feedback.
    pub async fn average_for_customer<'e>(
        db: impl PgExecutor<'e>,
        customer_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT AVG(rating)::float8 FROM customer_feedback WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_one(db)
        .await
    }
}
