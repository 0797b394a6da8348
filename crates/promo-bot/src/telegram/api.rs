//! Minimal Telegram Bot API client
//!
//! Only the two calls the bootstrap needs: resolving the bot's own username
//! and registering the webhook. Replies to users go out through the webhook
//! response, not through this client.

use serde::Deserialize;
use serde_json::json;

/// Telegram Bot API client
#[derive(Clone)]
pub struct Api {
    http: reqwest::Client,
    base: String,
}

/// The bot's own identity, from getMe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotInfo {
    pub id: i64,
    pub username: String,
}

/// Envelope every bot API response uses
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, ApiError> {
        if self.ok {
            self.result
                .ok_or_else(|| ApiError::Telegram("empty result".to_string()))
        } else {
            Err(ApiError::Telegram(
                self.description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

impl Api {
    /// Create a client for the given bot token
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("https://api.telegram.org/bot{token}"),
        }
    }

    /// Fetch the bot's own profile (used for referral deep links)
    pub async fn get_me(&self) -> Result<BotInfo, ApiError> {
        let response: ApiResponse<BotInfo> = self
            .http
            .get(format!("{}/getMe", self.base))
            .send()
            .await?
            .json()
            .await?;

        response.into_result()
    }

    /// Point Telegram's webhook delivery at `url`
    pub async fn set_webhook(&self, url: &str) -> Result<(), ApiError> {
        let response: ApiResponse<bool> = self
            .http
            .post(format!("{}/setWebhook", self.base))
            .json(&json!({ "url": url }))
            .send()
            .await?
            .json()
            .await?;

        response.into_result().map(|_| ())
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the base URL embeds the bot token
        f.debug_struct("Api").finish_non_exhaustive()
    }
}

/// Telegram API client errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram error: {0}")]
    Telegram(String),
}
