//! # promo-common
//!
//! Shared utilities including configuration and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, ServerConfig,
    TelegramConfig,
};
pub use telemetry::{init_tracing, try_init_tracing, TracingError};
