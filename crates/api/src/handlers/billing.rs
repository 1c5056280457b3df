//! Handler for the signed billing webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use innkeep_core::billing::{verify_signature, SIGNATURE_HEADER};
use innkeep_core::error::CoreError;
use innkeep_db::UnitOfWork;
use serde_json::json;

use crate::engine::billing::{self, BillingEvent};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/billing/webhook
///
/// The body must carry a valid `x-billing-signature`. Events that do not
/// apply are still acknowledged with 200.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<serde_json::Value>> {
    let Some(secret) = state.config.billing_webhook_secret.as_deref() else {
        tracing::warn!("Billing webhook called but BILLING_WEBHOOK_SECRET is unset");
        return Err(CoreError::Unauthorized("Billing webhook is not configured".into()).into());
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Missing billing signature".into()))?;
    if !verify_signature(secret, &body, signature) {
        return Err(CoreError::Unauthorized("Invalid billing signature".into()).into());
    }

    let event: BillingEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid billing event: {e}")))?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let updated = billing::apply_billing_event(&mut uow, &event).await?;
    uow.commit().await?;

    Ok(Json(json!({
        "received": true,
        "applied": updated.is_some(),
    })))
}
