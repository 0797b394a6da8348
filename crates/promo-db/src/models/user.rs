//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub referral_code: String,
    pub referrals: i32,
    pub referred_by: Option<i64>,
    pub last_promo_date: Option<DateTime<Utc>>,
    pub used_promo_codes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserModel {
    /// Check if the user is inside the issuance cooldown window
    #[inline]
    pub fn has_received_code(&self) -> bool {
        self.last_promo_date.is_some()
    }
}
