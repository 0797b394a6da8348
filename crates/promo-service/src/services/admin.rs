//! Admin service
//!
//! Pool management and aggregate statistics. Every operation re-checks the
//! acting user against the allow-list; the router does the same for menu
//! routing, but authorization lives here.

use chrono::Local;
use tracing::{info, instrument};

use promo_core::entities::{generate_promo_code, normalize_code, PromoCode};
use promo_core::error::DomainError;
use promo_core::value_objects::UserId;

use crate::dto::{BotStats, UserOverview};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::start_of_local_day;

/// Users shown in the top-referrers board
const TOP_REFERRERS: i64 = 10;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn require_admin(&self, acting: UserId) -> Result<(), DomainError> {
        if self.ctx.is_admin(acting) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }

    /// Add a code to the pool.
    ///
    /// `"auto"` (any case) generates a random 12-character code; anything
    /// else is upper-cased and validated against `[A-Z0-9]{6,20}`.
    #[instrument(skip(self))]
    pub async fn add_code(&self, acting: UserId, input: &str) -> ServiceResult<PromoCode> {
        self.require_admin(acting)?;

        let code = if input.trim().eq_ignore_ascii_case("auto") {
            generate_promo_code()
        } else {
            normalize_code(input)?
        };

        let promo = PromoCode::new(code, acting);
        self.ctx.code_repo().insert(&promo).await?;

        info!(code = %promo.code, added_by = %acting, "Promo code added");
        Ok(promo)
    }

    /// Delete a specific active code; returns whether anything was deleted
    #[instrument(skip(self))]
    pub async fn remove_code(&self, acting: UserId, code: &str) -> ServiceResult<bool> {
        self.require_admin(acting)?;

        let code = code.trim().to_ascii_uppercase();
        let removed = self.ctx.code_repo().remove(&code).await?;
        if removed {
            info!(code = %code, removed_by = %acting, "Promo code removed");
        }
        Ok(removed)
    }

    /// Active codes, newest first
    #[instrument(skip(self))]
    pub async fn list_codes(&self, acting: UserId, limit: i64) -> ServiceResult<Vec<PromoCode>> {
        self.require_admin(acting)?;
        Ok(self.ctx.code_repo().list_active(limit).await?)
    }

    /// User-base overview: totals plus the top referrers board
    #[instrument(skip(self))]
    pub async fn user_overview(&self, acting: UserId) -> ServiceResult<UserOverview> {
        self.require_admin(acting)?;

        let midnight = start_of_local_day(Local::now());
        let total_users = self.ctx.user_repo().count_all().await?;
        let users_today = self.ctx.user_repo().count_created_since(midnight).await?;
        let top_referrers = self.ctx.user_repo().top_by_referrals(TOP_REFERRERS).await?;

        Ok(UserOverview {
            total_users,
            users_today,
            top_referrers,
        })
    }

    /// Aggregate counters for the admin stats screen
    #[instrument(skip(self))]
    pub async fn bot_stats(&self, acting: UserId) -> ServiceResult<BotStats> {
        self.require_admin(acting)?;

        let midnight = start_of_local_day(Local::now());
        let total_users = self.ctx.user_repo().count_all().await?;
        let users_today = self.ctx.user_repo().count_created_since(midnight).await?;
        let active_codes = self.ctx.code_repo().count_active().await?;
        let total_codes = self.ctx.code_repo().count_all().await?;

        Ok(BotStats {
            total_users,
            users_today,
            active_codes,
            total_codes,
        })
    }
}
