//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use promo_core::entities::User;
use promo_core::error::DomainError;
use promo_core::traits::{RepoResult, UserRepository};
use promo_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, first_name, last_name, referral_code, referrals,
                   referred_by, last_promo_date, used_promo_codes, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_referral_code(&self, code: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, first_name, last_name, referral_code, referrals,
                   referred_by, last_promo_date, used_promo_codes, created_at
            FROM users
            WHERE referral_code = $1
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, first_name, last_name, referral_code,
                               referrals, referred_by, last_promo_date, used_promo_codes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.referral_code)
        .bind(user.referrals)
        .bind(user.referred_by.map(UserId::into_inner))
        .bind(user.last_promo_date)
        .bind(&user.used_promo_codes)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UserExists(user.id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn top_by_referrals(&self, limit: i64) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, first_name, last_name, referral_code, referrals,
                   referred_by, last_promo_date, used_promo_codes, created_at
            FROM users
            ORDER BY referrals DESC, created_at
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn link_referrer(&self, user_id: UserId, referrer_id: UserId) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let linked = sqlx::query(
            r"
            UPDATE users
            SET referred_by = $2
            WHERE id = $1 AND referred_by IS NULL AND id <> $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(referrer_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if linked.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        let credited = sqlx::query("UPDATE users SET referrals = referrals + 1 WHERE id = $1")
            .bind(referrer_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if credited.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn begin_issuance(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET last_promo_date = $2
            WHERE id = $1 AND (last_promo_date IS NULL OR last_promo_date <= $3)
            ",
        )
        .bind(user_id.into_inner())
        .bind(now)
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn finish_issuance(&self, user_id: UserId, code: &str) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE users SET used_promo_codes = array_append(used_promo_codes, $2) WHERE id = $1",
        )
        .bind(user_id.into_inner())
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotRegistered(user_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn abort_issuance(
        &self,
        user_id: UserId,
        previous: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        sqlx::query("UPDATE users SET last_promo_date = $2 WHERE id = $1")
            .bind(user_id.into_inner())
            .bind(previous)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
