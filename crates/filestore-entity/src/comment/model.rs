//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filestore_core::types::id::{CommentId, FileId, UserId};

/// A comment on a file. Replies point at their parent; comments without a
/// parent are thread roots.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Comment text.
    pub content: String,
    /// The file being discussed.
    pub file_id: FileId,
    /// Author.
    pub user_id: UserId,
    /// Parent comment for replies.
    pub parent_comment_id: Option<CommentId>,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Whether `user_id` wrote this comment.
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data required to post a comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    /// Comment text.
    pub content: String,
    /// Target file.
    pub file_id: FileId,
    /// Author.
    pub user_id: UserId,
    /// Parent comment for replies.
    pub parent_comment_id: Option<CommentId>,
}

impl CreateComment {
    /// Materialize the row that will be stored.
    pub fn into_comment(self, now: DateTime<Utc>) -> Comment {
        Comment {
            id: CommentId::new(),
            content: self.content,
            file_id: self.file_id,
            user_id: self.user_id,
            parent_comment_id: self.parent_comment_id,
            created_at: now,
            updated_at: now,
        }
    }
}
