//! Data transfer objects for service inputs and outputs
//!
//! The transport layer hands services a [`UserProfile`] extracted from the
//! platform event and gets plain data structs back; nothing here knows about
//! Telegram payloads or reply formatting.

use promo_core::entities::User;
use promo_core::value_objects::UserId;

/// Profile fields delivered by the platform with every event
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of a registration attempt
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub user: User,
    /// False when the user already existed (idempotent re-registration)
    pub created: bool,
    /// Referrer credited during this registration, for the greeting
    pub referrer: Option<User>,
}

/// Data behind the "my referral link" view
#[derive(Debug, Clone)]
pub struct ReferralSummary {
    pub referral_code: String,
    pub referrals: i32,
}

/// Per-user statistics view
#[derive(Debug, Clone)]
pub struct UserStats {
    pub display_name: String,
    pub referrals: i32,
    pub codes_received: usize,
    /// None when a code can be requested right now
    pub next_code_hours: Option<i64>,
    pub total_users: i64,
    pub active_codes: i64,
}

/// Admin view over the user base
#[derive(Debug, Clone)]
pub struct UserOverview {
    pub total_users: i64,
    pub users_today: i64,
    pub top_referrers: Vec<User>,
}

/// Admin aggregate counters
#[derive(Debug, Clone)]
pub struct BotStats {
    pub total_users: i64,
    pub users_today: i64,
    pub active_codes: i64,
    pub total_codes: i64,
}

impl BotStats {
    /// Average codes ever added per registered user
    pub fn codes_per_user(&self) -> f64 {
        if self.total_users == 0 {
            0.0
        } else {
            self.total_codes as f64 / self.total_users as f64
        }
    }
}
