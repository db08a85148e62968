//! Refresh token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use filestore_core::error::{AppError, ErrorKind};
use filestore_core::result::AppResult;
use filestore_core::types::id::UserId;
use filestore_entity::{CreateRefreshToken, RefreshToken};

use super::map_write_error;
use crate::store::RefreshTokenStore;

const INSERT_TOKEN: &str = r#"
    INSERT INTO refresh_tokens
        (id, token, user_id, created_at, created_by_ip, expires_at)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING *"#;

/// PostgreSQL-backed [`RefreshTokenStore`].
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn create(
        &self,
        token: CreateRefreshToken,
        now: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        let row = token.into_token(now);
        sqlx::query_as::<_, RefreshToken>(INSERT_TOKEN)
            .bind(row.id)
            .bind(&row.token)
            .bind(row.user_id)
            .bind(row.created_at)
            .bind(&row.created_by_ip)
            .bind(row.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(e, "Failed to store refresh token", "Refresh token collision")
            })
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
            })
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list refresh tokens", e)
        })
    }

    async fn rotate(
        &self,
        old_token: &str,
        replacement: CreateRefreshToken,
        now: DateTime<Utc>,
        ip: Option<&str>,
    ) -> AppResult<Option<RefreshToken>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // The WHERE clause is the compare-and-swap: of two concurrent
        // rotations only one sees the row unrevoked.
        let revoked = sqlx::query_scalar::<_, i64>(
            r#"UPDATE refresh_tokens
               SET revoked_at = $2, revoked_by_ip = $3, replaced_by_token = $4
               WHERE token = $1 AND revoked_at IS NULL AND expires_at > $2
               RETURNING 1::BIGINT"#,
        )
        .bind(old_token)
        .bind(now)
        .bind(ip)
        .bind(&replacement.token)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;

        if revoked.is_none() {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back rotation", e)
            })?;
            return Ok(None);
        }

        let row = replacement.into_token(now);
        let inserted = sqlx::query_as::<_, RefreshToken>(INSERT_TOKEN)
            .bind(row.id)
            .bind(&row.token)
            .bind(row.user_id)
            .bind(row.created_at)
            .bind(&row.created_by_ip)
            .bind(row.expires_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                map_write_error(e, "Failed to store refresh token", "Refresh token collision")
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rotation", e)
        })?;

        Ok(Some(inserted))
    }

    async fn revoke(
        &self,
        token: &str,
        now: DateTime<Utc>,
        ip: Option<&str>,
    ) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            r#"UPDATE refresh_tokens
               SET revoked_at = $2, revoked_by_ip = $3
               WHERE token = $1
               RETURNING *"#,
        )
        .bind(token)
        .bind(now)
        .bind(ip)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })
    }
}
