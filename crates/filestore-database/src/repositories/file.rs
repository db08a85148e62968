//! File metadata repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use filestore_core::error::{AppError, ErrorKind};
use filestore_core::result::AppResult;
use filestore_core::types::id::{FileId, UserId};
use filestore_core::types::pagination::{PageRequest, PagedResult};
use filestore_entity::{CreateFile, FileEntity};

use super::map_write_error;
use crate::store::FileStore;

/// PostgreSQL-backed [`FileStore`].
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn create(&self, file: CreateFile, now: DateTime<Utc>) -> AppResult<FileEntity> {
        let row = file.into_file(now);
        sqlx::query_as::<_, FileEntity>(
            r#"INSERT INTO files
                   (id, file_name, file_path, file_size, content_type, description,
                    user_id, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#,
        )
        .bind(row.id)
        .bind(&row.file_name)
        .bind(&row.file_path)
        .bind(row.file_size)
        .bind(&row.content_type)
        .bind(&row.description)
        .bind(row.user_id)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create file", "File already exists"))
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileEntity>> {
        sqlx::query_as::<_, FileEntity>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_owner(
        &self,
        owner: UserId,
        page: &PageRequest,
    ) -> AppResult<PagedResult<FileEntity>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE user_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, FileEntity>(
            r#"SELECT * FROM files WHERE user_id = $1
               ORDER BY created_at DESC, id DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(owner)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;

        Ok(PagedResult::new(files, page, total as u64))
    }

    async fn delete(&self, id: FileId) -> AppResult<bool> {
        // Shares and comments go with the file via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;

        Ok(result.rows_affected() > 0)
    }
}
