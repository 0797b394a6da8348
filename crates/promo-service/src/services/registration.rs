//! Registration service
//!
//! Handles first contact with a user: idempotent registration and, for new
//! users, the optional referral attribution carried in the start payload.

use tracing::{info, instrument};

use promo_core::entities::{generate_referral_code, User};

use crate::dto::{RegistrationOutcome, UserProfile};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::referral::ReferralService;

/// Attempts at generating a referral code that is not already taken
const MAX_CODE_ATTEMPTS: u32 = 3;

/// Registration service
pub struct RegistrationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RegistrationService<'a> {
    /// Create a new RegistrationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register the user, or return the existing record unchanged.
    ///
    /// The referral parameter is only applied when this call actually
    /// creates the user; re-registrations never re-run attribution.
    #[instrument(skip(self, profile), fields(user_id = %profile.id))]
    pub async fn register(
        &self,
        profile: UserProfile,
        start_payload: Option<&str>,
    ) -> ServiceResult<RegistrationOutcome> {
        if let Some(existing) = self.ctx.user_repo().find_by_id(profile.id).await? {
            return Ok(RegistrationOutcome {
                user: existing,
                created: false,
                referrer: None,
            });
        }

        let mut user = match self.create_with_fresh_code(&profile).await? {
            Created::New(user) => user,
            // lost a registration race; same as the idempotent path above
            Created::Existing(user) => {
                return Ok(RegistrationOutcome {
                    user,
                    created: false,
                    referrer: None,
                })
            }
        };
        info!(user_id = %user.id, referral_code = %user.referral_code, "User registered");

        let referrer = match start_payload.and_then(referral_code_from_payload) {
            Some(code) => ReferralService::new(self.ctx).apply(&user, &code).await?,
            None => None,
        };
        if let Some(r) = &referrer {
            user.referred_by = Some(r.id);
        }

        Ok(RegistrationOutcome {
            user,
            created: true,
            referrer,
        })
    }

    /// Insert the user, regenerating the referral code on a collision.
    ///
    /// A unique violation can mean two things: a concurrent registration of
    /// the same user (re-read and return it), or a referral-code collision
    /// (retry with a fresh code).
    async fn create_with_fresh_code(&self, profile: &UserProfile) -> ServiceResult<Created> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = User::new(profile.id, generate_referral_code()).with_profile(
                profile.username.clone(),
                profile.first_name.clone(),
                profile.last_name.clone(),
            );

            match self.ctx.user_repo().create(&candidate).await {
                Ok(()) => return Ok(Created::New(candidate)),
                Err(e) if e.is_conflict() => {
                    if let Some(existing) = self.ctx.user_repo().find_by_id(profile.id).await? {
                        return Ok(Created::Existing(existing));
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal(
            "could not generate a unique referral code",
        ))
    }
}

/// Outcome of the insert attempt
enum Created {
    New(User),
    Existing(User),
}

/// Extract a referral code from a `ref_<CODE>` start payload
fn referral_code_from_payload(payload: &str) -> Option<String> {
    payload
        .strip_prefix("ref_")
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}
