//! Comment service inputs and outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filestore_core::types::id::{CommentId, FileId, UserId};
use filestore_entity::Comment;

/// A new comment, optionally replying to another.
#[derive(Debug, Clone)]
pub struct AddComment {
    pub file_id: FileId,
    pub content: String,
    pub parent_comment_id: Option<CommentId>,
}

/// A comment as returned to clients.
///
/// `replies` is empty in flat listings and populated in thread views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: CommentId,
    pub content: String,
    pub file_id: FileId,
    pub user_id: UserId,
    /// Author's username; empty if the account no longer exists.
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub parent_comment_id: Option<CommentId>,
    #[serde(default)]
    pub replies: Vec<CommentDto>,
}

impl CommentDto {
    /// Builds a flat DTO for `comment` written by `username`.
    pub fn from_comment(comment: Comment, username: String) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            file_id: comment.file_id,
            user_id: comment.user_id,
            username,
            created_at: comment.created_at,
            parent_comment_id: comment.parent_comment_id,
            replies: Vec::new(),
        }
    }
}
