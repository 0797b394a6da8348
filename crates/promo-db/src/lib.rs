//! # promo-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `promo-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! The allocation and cooldown invariants live in single atomic statements
//! here; services never compose them from separate reads and writes.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{PgCodeRepository, PgUserRepository};

/// Embedded migrations for the schema the repositories expect
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
