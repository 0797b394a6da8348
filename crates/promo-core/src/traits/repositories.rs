//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The store is the single source of truth:
//! uniqueness and the allocation invariants are enforced by these
//! operations, never by in-process caches.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{PromoCode, User};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by their referral code
    async fn find_by_referral_code(&self, code: &str) -> RepoResult<Option<User>>;

    /// Insert a new user
    ///
    /// Fails with [`DomainError::UserExists`] when the id is already taken,
    /// so a concurrent double-registration can be resolved by re-reading.
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Total number of registered users
    async fn count_all(&self) -> RepoResult<i64>;

    /// Number of users created at or after `since`
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;

    /// Users with the highest referral counts, descending
    async fn top_by_referrals(&self, limit: i64) -> RepoResult<Vec<User>>;

    /// Attribute `user_id`'s registration to `referrer_id`.
    ///
    /// Sets `referred_by` and increments the referrer's counter in one
    /// transaction. Returns false without writing anything when the user
    /// already has a referrer, refers to themself, or either row is gone.
    async fn link_referrer(&self, user_id: UserId, referrer_id: UserId) -> RepoResult<bool>;

    /// Claim the cooldown slot for an issuance at `now`.
    ///
    /// Conditional update keyed by user id and last-issuance timestamp:
    /// stamps `last_promo_date = now` only where the previous stamp is NULL
    /// or at most `cutoff`. Returns false when a concurrent request already
    /// claimed the slot (or the user does not exist).
    async fn begin_issuance(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<bool>;

    /// Append `code` to the user's issued-codes history
    async fn finish_issuance(&self, user_id: UserId, code: &str) -> RepoResult<()>;

    /// Roll the cooldown stamp back to `previous` after a failed allocation
    async fn abort_issuance(
        &self,
        user_id: UserId,
        previous: Option<DateTime<Utc>>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Code Repository
// ============================================================================

#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Add a code to the pool
    ///
    /// Fails with [`DomainError::DuplicateCode`] when the code already exists.
    async fn insert(&self, code: &PromoCode) -> RepoResult<()>;

    /// Delete a specific active code; returns whether a row was deleted
    async fn remove(&self, code: &str) -> RepoResult<bool>;

    /// Atomically take one active code out of the pool.
    ///
    /// Selection is arbitrary. This must be a single atomic operation against
    /// the store - never a read followed by a separate write - so two
    /// concurrent requests can never receive the same code.
    async fn find_and_remove_active(&self) -> RepoResult<Option<PromoCode>>;

    /// Active codes ordered by creation time, newest first
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<PromoCode>>;

    /// Number of codes currently in the active pool
    async fn count_active(&self) -> RepoResult<i64>;

    /// Number of codes ever added (active and consumed)
    async fn count_all(&self) -> RepoResult<i64>;
}
