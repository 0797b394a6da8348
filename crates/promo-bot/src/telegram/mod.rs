//! Telegram Bot API types and bootstrap client

mod api;
mod types;

pub use api::{Api, ApiError, BotInfo};
pub use types::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, Message,
    ReplyKeyboardMarkup, ReplyMarkup, TgUser, Update, WebhookReply,
};
