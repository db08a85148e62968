//! Comment repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use filestore_core::error::{AppError, ErrorKind};
use filestore_core::result::AppResult;
use filestore_core::types::id::{CommentId, FileId};
use filestore_entity::{Comment, CreateComment};

use super::is_foreign_key_violation;
use crate::store::{CommentStore, HAS_REPLIES};

/// PostgreSQL-backed [`CommentStore`].
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn create(&self, comment: CreateComment, now: DateTime<Utc>) -> AppResult<Comment> {
        let row = comment.into_comment(now);
        sqlx::query_as::<_, Comment>(
            r#"INSERT INTO comments
                   (id, content, file_id, user_id, parent_comment_id, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(row.id)
        .bind(&row.content)
        .bind(row.file_id)
        .bind(row.user_id)
        .bind(row.parent_comment_id)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE file_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    async fn delete_leaf(&self, id: CommentId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"DELETE FROM comments
               WHERE id = $1
                 AND NOT EXISTS (SELECT 1 FROM comments WHERE parent_comment_id = $1)"#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // A reply inserted concurrently trips the parent foreign key.
            if is_foreign_key_violation(&e) {
                AppError::with_source(ErrorKind::Conflict, HAS_REPLIES, e)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to delete comment", e)
            }
        })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))?;

        if exists {
            Err(AppError::conflict(HAS_REPLIES))
        } else {
            Ok(false)
        }
    }
}
