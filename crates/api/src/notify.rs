//! Outbound notices to staff. Mail delivery plugs in behind [`ResetNotifier`].

use innkeep_core::types::Timestamp;

/// A freshly issued password-reset token, addressed to its user.
#[derive(Debug, Clone)]
pub struct ResetNotice {
    pub username: String,
    pub plaintext: String,
    pub expires_at: Timestamp,
}

/// Hands reset tokens to whatever reaches the user.
///
/// Called after the token is committed. Implementations must not block;
/// a mail transport should queue and return.
pub trait ResetNotifier: Send + Sync {
    fn deliver(&self, notice: ResetNotice);
}

/// Writes the notice to the log. Used when no mail transport is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogResetNotifier;

impl ResetNotifier for LogResetNotifier {
    fn deliver(&self, notice: ResetNotice) {
        tracing::info!(
            username = %notice.username,
            expires_at = %notice.expires_at,
            "Password reset token issued; no mail transport configured"
        );
        tracing::debug!(username = %notice.username, token = %notice.plaintext, "Password reset token");
    }
}
