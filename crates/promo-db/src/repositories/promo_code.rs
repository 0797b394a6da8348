//! PostgreSQL implementation of CodeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use promo_core::entities::PromoCode;
use promo_core::error::DomainError;
use promo_core::traits::{CodeRepository, RepoResult};
use promo_core::value_objects::UserId;

use crate::models::PromoCodeModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CodeRepository
#[derive(Clone)]
pub struct PgCodeRepository {
    pool: PgPool,
}

impl PgCodeRepository {
    /// Create a new PgCodeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CodeRepository for PgCodeRepository {
    #[instrument(skip(self, code), fields(code = %code.code))]
    async fn insert(&self, code: &PromoCode) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO promo_codes (code, added_by, created_at, is_active)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&code.code)
        .bind(code.added_by.into_inner())
        .bind(code.created_at)
        .bind(code.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateCode(code.code.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, code: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM promo_codes WHERE code = $1 AND is_active")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// One statement claims and deactivates a code; concurrent callers can
    /// never observe the same row thanks to FOR UPDATE SKIP LOCKED.
    #[instrument(skip(self))]
    async fn find_and_remove_active(&self) -> RepoResult<Option<PromoCode>> {
        let result = sqlx::query_as::<_, PromoCodeModel>(
            r"
            UPDATE promo_codes
            SET is_active = FALSE
            WHERE code = (
                SELECT code FROM promo_codes
                WHERE is_active
                ORDER BY created_at
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING code, added_by, created_at, is_active
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PromoCode::from))
    }

    #[instrument(skip(self))]
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<PromoCode>> {
        let results = sqlx::query_as::<_, PromoCodeModel>(
            r"
            SELECT code, added_by, created_at, is_active
            FROM promo_codes
            WHERE is_active
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PromoCode::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_active(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM promo_codes WHERE is_active")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM promo_codes")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
