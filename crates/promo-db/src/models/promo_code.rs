//! Promo code database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for promo_codes table
#[derive(Debug, Clone, FromRow)]
pub struct PromoCodeModel {
    pub code: String,
    pub added_by: i64,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}
