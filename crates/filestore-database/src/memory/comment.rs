use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filestore_core::error::AppError;
use filestore_core::result::AppResult;
use filestore_core::types::id::{CommentId, FileId};
use filestore_entity::{Comment, CreateComment};

use super::MemoryDatabase;
use crate::store::{CommentStore, HAS_REPLIES};

/// In-memory [`CommentStore`].
#[derive(Debug, Clone)]
pub struct MemoryCommentStore {
    db: MemoryDatabase,
}

impl MemoryCommentStore {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn create(&self, comment: CreateComment, now: DateTime<Utc>) -> AppResult<Comment> {
        let mut tables = self.db.tables().write().await;
        if !tables.files.iter().any(|f| f.id == comment.file_id) {
            return Err(AppError::database("Commented file does not exist"));
        }
        if let Some(parent) = comment.parent_comment_id {
            if !tables.comments.iter().any(|c| c.id == parent) {
                return Err(AppError::database("Parent comment does not exist"));
            }
        }
        let row = comment.into_comment(now);
        tables.comments.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        let tables = self.db.tables().read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<Comment>> {
        let tables = self.db.tables().read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.file_id == file_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn delete_leaf(&self, id: CommentId) -> AppResult<bool> {
        let mut tables = self.db.tables().write().await;
        let Some(index) = tables.comments.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        if tables.comments.iter().any(|c| c.parent_comment_id == Some(id)) {
            return Err(AppError::conflict(HAS_REPLIES));
        }
        tables.comments.remove(index);
        Ok(true)
    }
}
