//! Application state
//!
//! Holds the shared state for the Axum application: the command router and
//! the configuration.

use std::sync::Arc;

use promo_common::AppConfig;

use crate::router::CommandRouter;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    router: Arc<CommandRouter>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(router: CommandRouter, config: AppConfig) -> Self {
        Self {
            router: Arc::new(router),
            config: Arc::new(config),
        }
    }

    /// Get the command router
    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("router", &"CommandRouter")
            .field("config", &"AppConfig")
            .finish()
    }
}
