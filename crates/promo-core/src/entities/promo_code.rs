//! PromoCode entity - a single-use promotional code in the pool

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Minimum accepted length for an admin-supplied code
pub const CODE_MIN_LEN: usize = 6;
/// Maximum accepted length for an admin-supplied code
pub const CODE_MAX_LEN: usize = 20;
/// Length of auto-generated promo codes
const GENERATED_CODE_LEN: usize = 12;
/// Length of per-user referral codes
const REFERRAL_CODE_LEN: usize = 6;

/// Promo code entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    pub code: String,
    /// Admin who added the code to the pool
    pub added_by: UserId,
    pub created_at: DateTime<Utc>,
    /// Still in the distributable pool; flips to false on allocation
    pub is_active: bool,
}

impl PromoCode {
    /// Create a new active PromoCode
    pub fn new(code: String, added_by: UserId) -> Self {
        Self {
            code,
            added_by,
            created_at: Utc::now(),
            is_active: true,
        }
    }
}

/// Upper-case and validate an admin-supplied code.
///
/// Accepted codes match `[A-Z0-9]{6,20}` after case normalization.
pub fn normalize_code(input: &str) -> Result<String, DomainError> {
    let code = input.trim().to_ascii_uppercase();
    if code.len() < CODE_MIN_LEN || code.len() > CODE_MAX_LEN {
        return Err(DomainError::ValidationError(format!(
            "code must be {CODE_MIN_LEN}-{CODE_MAX_LEN} characters"
        )));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(DomainError::ValidationError(
            "code may only contain letters A-Z and digits 0-9".to_string(),
        ));
    }
    Ok(code)
}

/// Generate a random 12-character promo code
pub fn generate_promo_code() -> String {
    random_code(GENERATED_CODE_LEN)
}

/// Generate a random 6-character referral code
pub fn generate_referral_code() -> String {
    random_code(REFERRAL_CODE_LEN)
}

fn random_code(len: usize) -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
