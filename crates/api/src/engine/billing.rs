//! Subscription billing events.

use chrono::Utc;
use innkeep_core::billing::{extend_validity, EVENT_PAYMENT_SUCCEEDED};
use innkeep_db::models::hotel::Hotel;
use innkeep_db::repositories::HotelRepo;
use innkeep_db::UnitOfWork;
use serde::Deserialize;

use crate::error::AppResult;

/// Payment-provider event envelope: `{ "type": ..., "data": { "object": ... } }`.
#[derive(Debug, Deserialize)]
pub struct BillingEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: BillingEventData,
}

#[derive(Debug, Default, Deserialize)]
pub struct BillingEventData {
    #[serde(default)]
    pub object: BillingObject,
}

#[derive(Debug, Default, Deserialize)]
pub struct BillingObject {
    pub customer_email: Option<String>,
}

/// Apply a billing event. Returns the updated hotel, or `None` when the
/// event was acknowledged but ignored (other event type, unknown email).
pub async fn apply_billing_event(uow: &mut UnitOfWork, event: &BillingEvent) -> AppResult<Option<Hotel>> {
    if event.event_type != EVENT_PAYMENT_SUCCEEDED {
        tracing::info!(event_type = %event.event_type, "Ignoring billing event");
        return Ok(None);
    }

    let Some(email) = event.data.object.customer_email.as_deref().map(str::trim) else {
        tracing::warn!("Payment event without customer_email ignored");
        return Ok(None);
    };

    let Some(hotel) = HotelRepo::find_by_email_for_update(uow.conn(), email).await? else {
        tracing::warn!("No hotel matches payment email; event ignored");
        return Ok(None);
    };

    let valid_to = extend_validity(Utc::now(), hotel.valid_to);
    let hotel = HotelRepo::extend_subscription(uow.conn(), hotel.id, valid_to).await?;
    tracing::info!(hotel_id = hotel.id, valid_to = %valid_to, "Subscription extended");
    Ok(Some(hotel))
}
