//! Customer history: this hotel's bookings next to global reputation.
//!
//! Bookings are tenant-scoped. Feedback, the average rating, and the global
//! stay count span every hotel.

use innkeep_core::error::CoreError;
use innkeep_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use innkeep_core::types::DbId;
use innkeep_db::models::booking::Booking;
use innkeep_db::models::customer::Customer;
use innkeep_db::models::feedback::Feedback;
use innkeep_db::repositories::{BookingRepo, CustomerRepo, FeedbackRepo};
use serde::Serialize;
use sqlx::PgConnection;

use super::Actor;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct CustomerHistory {
    pub customer: Customer,
    pub viewer_hotel_id: DbId,
    /// Bookings at the viewer's hotel, newest first.
    pub bookings: Vec<Booking>,
    /// Across all hotels; 0.0 when there is no feedback.
    pub global_average_rating: f64,
    /// Across all hotels, newest first.
    pub feedback: Vec<Feedback>,
    pub global_stay_count: i64,
    pub hotel_stay_count: i64,
    pub limit: i64,
    pub offset: i64,
}

pub async fn customer_history(
    conn: &mut PgConnection,
    actor: Actor,
    customer_id: DbId,
    limit: Option<i64>,
    offset: Option<i64>,
) -> AppResult<CustomerHistory> {
    let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(offset);

    let customer = CustomerRepo::find_by_id(&mut *conn, customer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Customer", customer_id))?;

    let bookings =
        BookingRepo::list_for_customer_at_hotel(&mut *conn, customer_id, actor.hotel_id, limit, offset)
            .await?;
    let global_average_rating = FeedbackRepo::average_for_customer(&mut *conn, customer_id)
        .await?
        .unwrap_or(0.0);
    let feedback = FeedbackRepo::list_for_customer(&mut *conn, customer_id, limit, offset).await?;
    let global_stay_count = BookingRepo::count_for_customer(&mut *conn, customer_id).await?;
    let hotel_stay_count =
        BookingRepo::count_for_customer_at_hotel(&mut *conn, customer_id, actor.hotel_id).await?;

    Ok(CustomerHistory {
        customer,
        viewer_hotel_id: actor.hotel_id,
        bookings,
        global_average_rating,
        feedback,
        global_stay_count,
        hotel_stay_count,
        limit,
        offset,
    })
}
