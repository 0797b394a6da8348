//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, webhook};
use crate::state::AppState;

/// Create the application router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/webhook", post(webhook::handle_update))
        .route("/health", get(health::health_check))
}
