/// Password policy

pub mod entropy;

pub use entropy::estimate_entropy;

use crate::error::{Result, SanitizeError};

/// Minimum estimated entropy, in bits, for a password to be accepted.
pub const MIN_ENTROPY_BITS: f64 = 60.0;

/// Check a password against the policy and hand it back untouched.
///
/// Boundary whitespace is rejected rather than trimmed, so the stored secret
/// is always exactly what the user typed.
pub fn sanitize_password_policy(raw: &str) -> Result<String> {
    if raw.trim() != raw {
        return Err(SanitizeError::PasswordWhitespace);
    }

    if estimate_entropy(raw) < MIN_ENTROPY_BITS {
        return Err(SanitizeError::InvalidPassword);
    }

    Ok(raw.to_string())
}
