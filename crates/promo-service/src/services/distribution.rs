//! Distribution service
//!
//! The one workflow with a real invariant to protect: at most one code per
//! user per 24-hour window, and every code handed out at most once. Both
//! sides are enforced by single atomic store operations, never by a read
//! followed by a separate write.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use promo_core::entities::{PromoCode, User};
use promo_core::error::DomainError;
use promo_core::value_objects::UserId;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Distribution service
pub struct DistributionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DistributionService<'a> {
    /// Create a new DistributionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue one code to the user, subject to the 24-hour cooldown.
    ///
    /// The cooldown slot is claimed first with a conditional update; only a
    /// request that wins the claim touches the pool, so a double-submitted
    /// command yields exactly one code. An empty pool releases the claim
    /// again.
    #[instrument(skip(self))]
    pub async fn request_daily_code(&self, user_id: UserId) -> ServiceResult<PromoCode> {
        let now = Utc::now();

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotRegistered(user_id))?;

        if let Some(hours_remaining) = user.hours_until_next_code(now) {
            return Err(DomainError::CooldownActive { hours_remaining }.into());
        }

        let cutoff = now - Duration::hours(User::COOLDOWN_HOURS);
        if !self
            .ctx
            .user_repo()
            .begin_issuance(user_id, now, cutoff)
            .await?
        {
            // a concurrent duplicate submission claimed the slot first
            return Err(DomainError::CooldownActive {
                hours_remaining: User::COOLDOWN_HOURS,
            }
            .into());
        }

        match self.ctx.code_repo().find_and_remove_active().await? {
            Some(code) => {
                self.ctx
                    .user_repo()
                    .finish_issuance(user_id, &code.code)
                    .await?;
                info!(user_id = %user_id, code = %code.code, "Promo code issued");
                Ok(code)
            }
            None => {
                // hand the claimed slot back so the user stays eligible
                if let Err(e) = self
                    .ctx
                    .user_repo()
                    .abort_issuance(user_id, user.last_promo_date)
                    .await
                {
                    warn!(user_id = %user_id, error = %e, "Failed to release cooldown slot");
                }
                Err(DomainError::PoolExhausted.into())
            }
        }
    }
}
