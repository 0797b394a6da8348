//! Promo bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p promo-bot
//! ```
//!
//! Configuration is loaded from environment variables (or a `.env` file).

use promo_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(config.app.env) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.server.port,
        admins = config.admin.ids.len(),
        "Configuration loaded"
    );

    if let Err(e) = promo_bot::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
