//! User-facing statistics

use chrono::Utc;
use tracing::instrument;

use promo_core::error::DomainError;
use promo_core::value_objects::UserId;

use crate::dto::UserStats;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Stats service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The user's personal statistics plus the global counters
    #[instrument(skip(self))]
    pub async fn user_stats(&self, user_id: UserId) -> ServiceResult<UserStats> {
        let now = Utc::now();

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotRegistered(user_id))?;

        let total_users = self.ctx.user_repo().count_all().await?;
        let active_codes = self.ctx.code_repo().count_active().await?;

        Ok(UserStats {
            display_name: user.display_name(),
            referrals: user.referrals,
            codes_received: user.used_promo_codes.len(),
            next_code_hours: user.hours_until_next_code(now),
            total_users,
            active_codes,
        })
    }

    /// All codes ever issued to the user, oldest first
    #[instrument(skip(self))]
    pub async fn code_history(&self, user_id: UserId) -> ServiceResult<Vec<String>> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotRegistered(user_id))?;

        Ok(user.used_promo_codes)
    }
}
