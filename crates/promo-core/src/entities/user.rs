//! User entity - a registered bot user

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::UserId;

/// User entity representing a registered bot user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Unique per-user code other users register with to credit this user
    pub referral_code: String,
    /// Number of successful referrals attributed to this user
    pub referrals: i32,
    /// Referrer id, set at most once and never equal to `id`
    pub referred_by: Option<UserId>,
    /// Timestamp of the last successful code issuance
    pub last_promo_date: Option<DateTime<Utc>>,
    /// Issued codes, append-only, oldest first
    pub used_promo_codes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Mandatory wait between successful code issuances
    pub const COOLDOWN_HOURS: i64 = 24;

    /// Create a new User with required fields
    pub fn new(id: UserId, referral_code: String) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
            referral_code,
            referrals: 0,
            referred_by: None,
            last_promo_date: None,
            used_promo_codes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Attach the profile fields delivered by the platform
    pub fn with_profile(
        mut self,
        username: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        self.username = username;
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Best human-readable name: first name, else username, else the raw id
    pub fn display_name(&self) -> String {
        if let Some(first_name) = &self.first_name {
            first_name.clone()
        } else if let Some(username) = &self.username {
            username.clone()
        } else {
            format!("ID: {}", self.id)
        }
    }

    /// Whole hours until the next code can be issued, rounded up.
    ///
    /// Returns `None` when the user is eligible right now (never issued,
    /// or the cooldown window has fully elapsed).
    pub fn hours_until_next_code(&self, now: DateTime<Utc>) -> Option<i64> {
        let last = self.last_promo_date?;
        let elapsed = now.signed_duration_since(last);
        if elapsed >= Duration::hours(Self::COOLDOWN_HOURS) {
            return None;
        }
        let remaining = Duration::hours(Self::COOLDOWN_HOURS) - elapsed;
        Some((remaining.num_seconds() + 3599) / 3600)
    }

    /// Check whether a code may be issued at `now`
    #[inline]
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        self.hours_until_next_code(now).is_none()
    }

    /// Whether a referral from `referrer` may still be applied to this user
    pub fn can_be_referred_by(&self, referrer: UserId) -> bool {
        self.referred_by.is_none() && self.id != referrer
    }

    /// Record a successful issuance at `now`
    pub fn record_issuance(&mut self, code: String, now: DateTime<Utc>) {
        self.last_promo_date = Some(now);
        self.used_promo_codes.push(code);
    }
}
