//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // User-facing workflow errors
    // =========================================================================
    #[error("user {0} is not registered")]
    NotRegistered(UserId),

    #[error("cooldown active: {hours_remaining} hours remaining")]
    CooldownActive { hours_remaining: i64 },

    #[error("promo code pool is exhausted")]
    PoolExhausted,

    #[error("promo code already exists: {0}")]
    DuplicateCode(String),

    #[error("promo code not found: {0}")]
    CodeNotFound(String),

    #[error("not authorized for admin commands")]
    Unauthorized,

    #[error("validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("user already registered: {0}")]
    UserExists(UserId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and replies
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotRegistered(_) => "NOT_REGISTERED",
            Self::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            Self::PoolExhausted => "POOL_EXHAUSTED",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::CodeNotFound(_) => "UNKNOWN_CODE",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UserExists(_) => "USER_EXISTS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is an unexpected infrastructure failure
    ///
    /// Storage failures get a generic transient-failure reply; everything
    /// else maps to a specific user-facing message.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateCode(_) | Self::UserExists(_))
    }
}
