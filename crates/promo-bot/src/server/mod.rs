//! Server setup and initialization
//!
//! Wires the pool, repositories, service context, Telegram bootstrap and
//! Axum application together.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use promo_common::AppConfig;
use promo_core::value_objects::UserId;
use promo_db::{create_pool, DatabaseConfig, PgCodeRepository, PgUserRepository};
use promo_service::ServiceContext;

use crate::router::CommandRouter;
use crate::routes::create_router;
use crate::state::AppState;
use crate::telegram::Api;

/// Webhook handling has no long-running work; anything slower is stuck
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Build the complete Axum application
pub fn create_app(state: AppState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("PostgreSQL connection established");

    promo_db::MIGRATOR
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    // Telegram bootstrap: resolve our own username and register the webhook
    let api = Api::new(&config.telegram.bot_token);
    let me = api
        .get_me()
        .await
        .context("failed to fetch bot identity from Telegram")?;
    info!(bot = %me.username, "Telegram identity resolved");

    let webhook_url = format!("{}/webhook", config.telegram.webhook_url);
    match api.set_webhook(&webhook_url).await {
        Ok(()) => info!(url = %webhook_url, "Webhook registered"),
        Err(e) => warn!(error = %e, "Failed to register webhook; continuing"),
    }

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let code_repo = Arc::new(PgCodeRepository::new(pool));
    let admin_ids: HashSet<UserId> = config.admin.ids.iter().copied().map(UserId::new).collect();
    let ctx = ServiceContext::new(user_repo, code_repo, admin_ids);

    let router = CommandRouter::new(ctx, me.username);
    Ok(AppState::new(router, config))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let address = config.server.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;
    info!("Server listening on http://{address}");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
