//! # promo-bot
//!
//! Telegram webhook server built with Axum. Updates arrive on the webhook
//! endpoint, are parsed into command events, dispatched through the command
//! router, and answered directly in the webhook response.

pub mod commands;
pub mod handlers;
pub mod replies;
pub mod router;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod telegram;

pub use server::run;
