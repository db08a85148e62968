//! Share repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use filestore_core::error::{AppError, ErrorKind};
use filestore_core::result::AppResult;
use filestore_core::types::id::FileId;
use filestore_entity::{CreateFileShare, FileShare};

use super::map_write_error;
use crate::store::ShareStore;

/// PostgreSQL-backed [`ShareStore`].
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn create(&self, share: CreateFileShare, now: DateTime<Utc>) -> AppResult<FileShare> {
        let row = share.into_share(now);
        sqlx::query_as::<_, FileShare>(
            r#"INSERT INTO file_shares
                   (id, file_id, shared_with_email, share_token, expires_at,
                    accepted_at, is_accepted, permission, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#,
        )
        .bind(row.id)
        .bind(row.file_id)
        .bind(&row.shared_with_email)
        .bind(&row.share_token)
        .bind(row.expires_at)
        .bind(row.accepted_at)
        .bind(row.is_accepted)
        .bind(row.permission)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create share", "Share token collision"))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<FileShare>> {
        sqlx::query_as::<_, FileShare>("SELECT * FROM file_shares WHERE share_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share by token", e)
            })
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<FileShare>> {
        sqlx::query_as::<_, FileShare>(
            "SELECT * FROM file_shares WHERE file_id = $1 ORDER BY created_at ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    async fn find_accepted_for_email(&self, email: &str) -> AppResult<Vec<FileShare>> {
        sqlx::query_as::<_, FileShare>(
            r#"SELECT * FROM file_shares
               WHERE shared_with_email = $1 AND is_accepted = TRUE
               ORDER BY accepted_at DESC"#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list shared files", e)
        })
    }

    async fn accept(&self, token: &str, now: DateTime<Utc>) -> AppResult<Option<FileShare>> {
        sqlx::query_as::<_, FileShare>(
            r#"UPDATE file_shares
               SET is_accepted = TRUE, accepted_at = $2
               WHERE share_token = $1 AND is_accepted = FALSE AND expires_at > $2
               RETURNING *"#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to accept share", e))
    }

    async fn delete_pending(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<FileShare>> {
        sqlx::query_as::<_, FileShare>(
            r#"DELETE FROM file_shares
               WHERE share_token = $1 AND is_accepted = FALSE AND expires_at > $2
               RETURNING *"#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reject share", e))
    }
}
