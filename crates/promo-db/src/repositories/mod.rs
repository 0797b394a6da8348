//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in promo-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod promo_code;
mod user;

pub use promo_code::PgCodeRepository;
pub use user::PgUserRepository;
