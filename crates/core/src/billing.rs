//! Subscription billing: validity extension and webhook signature checks.
//!
//! A hotel's subscription is valid while `valid_to` lies in the future. A
//! successful payment extends it by [`SUBSCRIPTION_EXTENSION_DAYS`] from
//! whichever is later, now or the current `valid_to`, so early renewals
//! never lose paid-up days.

use chrono::Duration;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Days added to a subscription per successful payment.
pub const SUBSCRIPTION_EXTENSION_DAYS: i64 = 30;

/// Event type that extends a subscription. Other event types are
/// acknowledged and ignored.
pub const EVENT_PAYMENT_SUCCEEDED: &str = "invoice.payment_succeeded";

/// Header carrying the hex-encoded HMAC-SHA256 of the raw webhook body.
pub const SIGNATURE_HEADER: &str = "x-billing-signature";

// ---------------------------------------------------------------------------
// Validity
// ---------------------------------------------------------------------------

/// New `valid_to` after a successful payment.
pub fn extend_validity(now: Timestamp, current_valid_to: Option<Timestamp>) -> Timestamp {
    let base = match current_valid_to {
        Some(valid_to) if valid_to > now => valid_to,
        _ => now,
    };
    base + Duration::days(SUBSCRIPTION_EXTENSION_DAYS)
}

/// Whether a subscription is currently paid up.
pub fn is_subscription_active(now: Timestamp, valid_to: Option<Timestamp>) -> bool {
    valid_to.is_some_and(|v| v > now)
}

// ---------------------------------------------------------------------------
// Webhook signatures
// ---------------------------------------------------------------------------

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `payload` under `secret`.
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time check of a hex signature against `payload`.
pub fn verify_signature(secret: &str, payload: &[u8], signature_hex: &str) -> bool {
    let Some(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// `None` on odd length or a non-hex digit.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
            .collect()
    }
}
