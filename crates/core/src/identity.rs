//! Staff account rules: password policy and reset tokens.
//!
//! Reset tokens are random alphanumeric strings handed to the user once.
//! Only their SHA-256 digest is stored, together with an expiry.

use chrono::Duration;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length of a generated reset token.
pub const RESET_TOKEN_LENGTH: usize = 40;

/// Lifetime of a reset token.
pub const RESET_TOKEN_TTL_MINS: i64 = 30;

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// A freshly generated reset token. `plaintext` is never persisted.
pub struct ResetToken {
    pub plaintext: String,
    pub hash: String,
    pub expires_at: Timestamp,
}

pub fn generate_reset_token(now: Timestamp) -> ResetToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_reset_token(&plaintext);
    ResetToken {
        plaintext,
        hash,
        expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINS),
    }
}

/// Hex SHA-256 of the trimmed token, as stored on the user row.
pub fn hash_reset_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.trim().as_bytes()))
}
