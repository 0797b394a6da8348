//! Webhook handler
//!
//! Accepts Telegram update payloads, turns them into command events, and
//! answers the webhook call directly with a sendMessage payload. Malformed
//! or irrelevant updates are acknowledged with 200 and no action, so
//! Telegram never retries them.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use promo_core::value_objects::UserId;
use promo_service::UserProfile;

use crate::commands::{cancel_delete_callback_data, delete_callback_data, Command};
use crate::replies::{Menu, Reply};
use crate::router::CommandEvent;
use crate::state::AppState;
use crate::telegram::{
    InlineKeyboardButton, InlineKeyboardMarkup, ReplyKeyboardMarkup, ReplyMarkup, TgUser, Update,
    WebhookReply,
};

use crate::commands::labels;

/// Handle one webhook delivery
///
/// POST /webhook
pub async fn handle_update(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let update: Update = match serde_json::from_value(payload) {
        Ok(update) => update,
        Err(e) => {
            debug!(error = %e, "Ignoring malformed update");
            return StatusCode::OK.into_response();
        }
    };

    match event_from_update(update) {
        Some((chat_id, event)) => {
            let reply = state.router().dispatch(event).await;
            Json(webhook_reply(chat_id, reply)).into_response()
        }
        None => StatusCode::OK.into_response(),
    }
}

/// Extract the chat to answer and the command event, if the update carries one
fn event_from_update(update: Update) -> Option<(i64, CommandEvent)> {
    if let Some(callback) = update.callback_query {
        let chat_id = callback
            .message
            .as_ref()
            .map_or(callback.from.id, |m| m.chat.id);
        let command = Command::from_callback_data(callback.data.as_deref()?)?;
        return Some((
            chat_id,
            CommandEvent {
                profile: profile_from(callback.from),
                command,
            },
        ));
    }

    let message = update.message?;
    let from = message.from?;
    let text = message.text?;
    Some((
        message.chat.id,
        CommandEvent {
            profile: profile_from(from),
            command: Command::from_text(&text),
        },
    ))
}

fn profile_from(user: TgUser) -> UserProfile {
    UserProfile {
        id: UserId::new(user.id),
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
    }
}

/// Render the router's transport-agnostic reply as a webhook response
fn webhook_reply(chat_id: i64, reply: Reply) -> WebhookReply {
    let mut payload = WebhookReply::send_message(chat_id, reply.text);
    if let Some(menu) = reply.menu {
        payload = payload.with_markup(markup_for(menu));
    }
    payload
}

/// Render an abstract menu as Telegram keyboard JSON
fn markup_for(menu: Menu) -> ReplyMarkup {
    match menu {
        Menu::Main => ReplyMarkup::Keyboard(ReplyKeyboardMarkup::from_rows(&[
            &[labels::DAILY_CODE, labels::REFERRAL_LINK],
            &[labels::MY_CODES, labels::MY_STATS],
        ])),
        Menu::Admin => ReplyMarkup::Keyboard(ReplyKeyboardMarkup::from_rows(&[
            &[labels::ADMIN_ADD_CODE, labels::ADMIN_REMOVE_CODE],
            &[labels::ADMIN_LIST_CODES, labels::ADMIN_USERS],
            &[labels::ADMIN_STATS, labels::ADMIN_MAIN_MENU],
        ])),
        Menu::AddCode => ReplyMarkup::Keyboard(ReplyKeyboardMarkup::from_rows(&[
            &[labels::AUTO],
            &[labels::CANCEL],
        ])),
        Menu::DeletableCodes(codes) => {
            let mut rows: Vec<Vec<InlineKeyboardButton>> = codes
                .iter()
                .map(|code| {
                    vec![InlineKeyboardButton::callback(
                        code.clone(),
                        delete_callback_data(code),
                    )]
                })
                .collect();
            rows.push(vec![InlineKeyboardButton::callback(
                "❌ Cancel",
                cancel_delete_callback_data(),
            )]);
            ReplyMarkup::Inline(InlineKeyboardMarkup {
                inline_keyboard: rows,
            })
        }
        Menu::Share { url } => ReplyMarkup::Inline(InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton::link("📲 Share", url)]],
        }),
    }
}
