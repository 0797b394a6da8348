//! Command router
//!
//! Single dispatch point between the transport and the services: one
//! inbound event, one tagged reply. Recoverable errors map to specific
//! reply texts; unexpected storage failures are logged and surfaced as a
//! generic transient-failure message.

use tracing::{error, instrument};

use promo_core::entities::User;
use promo_core::error::DomainError;
use promo_core::value_objects::UserId;
use promo_service::{
    AdminService, DistributionService, ReferralService, RegistrationService, ServiceContext,
    ServiceError, ServiceResult, StatsService, UserProfile,
};

use crate::commands::{labels, Command};
use crate::replies::{self, Reply};
use crate::session::{Conversation, ConversationStore};

/// Codes offered in the delete picker
const REMOVE_PICKER_LIMIT: i64 = 50;
/// Codes shown in the admin listing
const LIST_CODES_LIMIT: i64 = 100;

/// An inbound command event with the sender's profile
#[derive(Debug, Clone)]
pub struct CommandEvent {
    pub profile: UserProfile,
    pub command: Command,
}

/// Routes command events to services and formats the replies
pub struct CommandRouter {
    ctx: ServiceContext,
    sessions: ConversationStore,
    bot_username: String,
}

impl CommandRouter {
    /// Create a new CommandRouter
    pub fn new(ctx: ServiceContext, bot_username: String) -> Self {
        Self {
            ctx,
            sessions: ConversationStore::default(),
            bot_username,
        }
    }

    /// Handle one event, never failing: every error becomes a reply
    #[instrument(skip(self, event), fields(user_id = %event.profile.id, command = ?event.command))]
    pub async fn dispatch(&self, event: CommandEvent) -> Reply {
        match self.handle(event).await {
            Ok(reply) => reply,
            Err(err) => reply_for_error(&err),
        }
    }

    async fn handle(&self, event: CommandEvent) -> ServiceResult<Reply> {
        let user_id = event.profile.id;
        let is_admin = self.ctx.is_admin(user_id);

        match event.command {
            Command::Start { payload } => {
                let outcome = RegistrationService::new(&self.ctx)
                    .register(event.profile, payload.as_deref())
                    .await?;
                let referrer_name = outcome.referrer.as_ref().map(User::display_name);
                Ok(replies::welcome(
                    &outcome.user,
                    is_admin,
                    referrer_name.as_deref(),
                ))
            }

            Command::RequestDailyCode => {
                let code = DistributionService::new(&self.ctx)
                    .request_daily_code(user_id)
                    .await?;
                Ok(replies::code_issued(&code.code))
            }

            Command::ViewReferral => {
                let summary = ReferralService::new(&self.ctx).summary(user_id).await?;
                Ok(replies::referral_link(&summary, &self.bot_username))
            }

            Command::ViewHistory => {
                let codes = StatsService::new(&self.ctx).code_history(user_id).await?;
                Ok(replies::history(&codes))
            }

            Command::ViewStats => {
                let stats = StatsService::new(&self.ctx).user_stats(user_id).await?;
                Ok(replies::user_stats(&stats))
            }

            Command::AdminAddCode => {
                if !is_admin {
                    return Ok(replies::admins_only());
                }
                self.sessions.begin(user_id, Conversation::AwaitingCode);
                Ok(replies::add_code_prompt())
            }

            Command::AdminRemoveCode => {
                let codes = AdminService::new(&self.ctx)
                    .list_codes(user_id, REMOVE_PICKER_LIMIT)
                    .await?;
                Ok(replies::remove_code_picker(&codes))
            }

            Command::AdminListCodes => {
                let codes = AdminService::new(&self.ctx)
                    .list_codes(user_id, LIST_CODES_LIMIT)
                    .await?;
                Ok(replies::codes_list(&codes))
            }

            Command::AdminListUsers => {
                let overview = AdminService::new(&self.ctx).user_overview(user_id).await?;
                Ok(replies::user_overview(&overview))
            }

            Command::AdminBotStats => {
                let stats = AdminService::new(&self.ctx).bot_stats(user_id).await?;
                Ok(replies::bot_stats(&stats))
            }

            Command::AdminMainMenu => {
                if !is_admin {
                    return Ok(replies::admins_only());
                }
                self.sessions.end(user_id);
                Ok(replies::main_menu())
            }

            Command::DeleteCode(code) => {
                let removed = AdminService::new(&self.ctx)
                    .remove_code(user_id, &code)
                    .await?;
                if removed {
                    Ok(replies::code_removed(&code))
                } else {
                    Ok(replies::code_not_found())
                }
            }

            Command::CancelDelete => {
                if !is_admin {
                    return Ok(replies::admins_only());
                }
                Ok(replies::delete_cancelled())
            }

            Command::Text(text) => self.handle_free_text(user_id, is_admin, &text).await,
        }
    }

    /// Free text only means something inside the add-code dialog
    async fn handle_free_text(
        &self,
        user_id: UserId,
        is_admin: bool,
        text: &str,
    ) -> ServiceResult<Reply> {
        if !(is_admin && self.sessions.get(user_id) == Some(Conversation::AwaitingCode)) {
            return Ok(replies::buttons_only(is_admin));
        }

        if text.eq_ignore_ascii_case(labels::CANCEL) {
            self.sessions.end(user_id);
            return Ok(replies::add_code_cancelled());
        }

        match AdminService::new(&self.ctx).add_code(user_id, text).await {
            Ok(promo) => {
                self.sessions.end(user_id);
                Ok(replies::code_added(&promo.code))
            }
            // dialog stays open so the admin can correct the input
            Err(err) => match err.as_domain() {
                Some(DomainError::ValidationError(reason)) => Ok(replies::invalid_code(reason)),
                Some(DomainError::DuplicateCode(_)) => Ok(replies::duplicate_code()),
                _ => Err(err),
            },
        }
    }
}

/// Map a service error to its user-facing reply
pub fn reply_for_error(err: &ServiceError) -> Reply {
    if err.is_unexpected() {
        error!(error = %err, code = err.error_code(), "Command failed");
        return replies::transient_failure();
    }

    match err.as_domain() {
        Some(DomainError::NotRegistered(_)) => replies::not_registered(),
        Some(DomainError::CooldownActive { hours_remaining }) => {
            replies::cooldown(*hours_remaining)
        }
        Some(DomainError::PoolExhausted) => replies::pool_empty(),
        Some(DomainError::DuplicateCode(_)) => replies::duplicate_code(),
        Some(DomainError::CodeNotFound(_)) => replies::code_not_found(),
        Some(DomainError::Unauthorized) => replies::admins_only(),
        Some(DomainError::ValidationError(reason)) => replies::invalid_code(reason),
        _ => replies::transient_failure(),
    }
}
