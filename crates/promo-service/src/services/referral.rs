//! Referral service
//!
//! Attributes a new registration to the owner of a referral code. Every
//! guard failure is a silent no-op; the referral count is informational
//! only and never alters the issuance cooldown.

use tracing::{info, instrument};

use promo_core::entities::User;
use promo_core::error::DomainError;
use promo_core::value_objects::UserId;

use crate::dto::ReferralSummary;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Referral service
pub struct ReferralService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReferralService<'a> {
    /// Create a new ReferralService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a referral code to a freshly registered user.
    ///
    /// Returns the credited referrer, or `None` when nothing was applied:
    /// unknown code, self-referral, or the user already has a referrer.
    /// The final word is the store's conditional update, so a concurrent
    /// double-apply credits at most one referrer.
    #[instrument(skip(self, new_user), fields(user_id = %new_user.id))]
    pub async fn apply(&self, new_user: &User, referral_code: &str) -> ServiceResult<Option<User>> {
        let Some(referrer) = self
            .ctx
            .user_repo()
            .find_by_referral_code(referral_code)
            .await?
        else {
            return Ok(None);
        };

        if !new_user.can_be_referred_by(referrer.id) {
            return Ok(None);
        }

        if !self
            .ctx
            .user_repo()
            .link_referrer(new_user.id, referrer.id)
            .await?
        {
            return Ok(None);
        }

        info!(
            user_id = %new_user.id,
            referrer_id = %referrer.id,
            "Referral applied"
        );
        Ok(Some(referrer))
    }

    /// Data for the user's referral view
    #[instrument(skip(self))]
    pub async fn summary(&self, user_id: UserId) -> ServiceResult<ReferralSummary> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotRegistered(user_id))?;

        Ok(ReferralSummary {
            referral_code: user.referral_code,
            referrals: user.referrals,
        })
    }
}
