//! Comment service.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use filestore_core::error::AppError;
use filestore_core::traits::{Clock, NotificationKind, Notifier};
use filestore_core::types::id::{CommentId, FileId, UserId};
use filestore_database::{CommentStore, FileStore, UserStore};
use filestore_entity::{Comment, CreateComment};

use super::dto::{AddComment, CommentDto};
use super::thread::build_thread;
use crate::context::RequestContext;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 2000;

const FILE_NOT_FOUND: &str = "File not found.";
const NOT_FOUND_OR_UNAUTHORIZED: &str = "Comment not found or unauthorized.";

/// Adds, lists and deletes comments.
///
/// Any authenticated user may comment on any existing file; only authors
/// may delete their comments.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    files: Arc<dyn FileStore>,
    users: Arc<dyn UserStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CommentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentService").finish()
    }
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comments: Arc<dyn CommentStore>,
        files: Arc<dyn FileStore>,
        users: Arc<dyn UserStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            comments,
            files,
            users,
            notifier,
            clock,
        }
    }

    /// Adds a comment and notifies the file owner when someone else wrote it.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        request: AddComment,
    ) -> Result<CommentDto, AppError> {
        let content = request.content.trim();
        let length = content.chars().count();
        if length == 0 {
            return Err(AppError::validation("Comment content is required"));
        }
        if length > MAX_COMMENT_LENGTH {
            return Err(AppError::validation(format!(
                "Comment must be at most {MAX_COMMENT_LENGTH} characters"
            )));
        }

        let file = self
            .files
            .find_by_id(request.file_id)
            .await?
            .ok_or_else(|| AppError::not_found(FILE_NOT_FOUND))?;

        if let Some(parent_id) = request.parent_comment_id {
            let parent = self.comments.find_by_id(parent_id).await?;
            if !parent.is_some_and(|p| p.file_id == file.id) {
                return Err(AppError::validation(
                    "Parent comment does not exist on this file",
                ));
            }
        }

        let comment = self
            .comments
            .create(
                CreateComment {
                    content: content.to_string(),
                    file_id: file.id,
                    user_id: ctx.user_id,
                    parent_comment_id: request.parent_comment_id,
                },
                self.clock.now(),
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            comment_id = %comment.id,
            reply = comment.parent_comment_id.is_some(),
            "Comment added"
        );

        if !file.is_owned_by(ctx.user_id) {
            self.notifier
                .notify(
                    file.user_id,
                    NotificationKind::NewComment,
                    format!("{} commented on your file '{}'.", ctx.username, file.file_name),
                )
                .await;
        }

        Ok(CommentDto::from_comment(comment, ctx.username.clone()))
    }

    /// All comments on a file, oldest first, without nesting.
    pub async fn get_file_comments(&self, file_id: FileId) -> Result<Vec<CommentDto>, AppError> {
        let comments = self.comments.find_by_file(file_id).await?;
        self.with_usernames(comments).await
    }

    /// All comments on a file nested into reply trees.
    pub async fn get_comment_thread(&self, file_id: FileId) -> Result<Vec<CommentDto>, AppError> {
        Ok(build_thread(self.get_file_comments(file_id).await?))
    }

    /// Deletes the caller's comment. Comments that have replies are kept.
    pub async fn delete_comment(
        &self,
        ctx: &RequestContext,
        comment_id: CommentId,
    ) -> Result<bool, AppError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.is_authored_by(ctx.user_id))
            .ok_or_else(|| AppError::not_found(NOT_FOUND_OR_UNAUTHORIZED))?;

        if !self.comments.delete_leaf(comment.id).await? {
            return Err(AppError::not_found(NOT_FOUND_OR_UNAUTHORIZED));
        }

        info!(user_id = %ctx.user_id, comment_id = %comment.id, "Comment deleted");
        Ok(true)
    }

    async fn with_usernames(&self, comments: Vec<Comment>) -> Result<Vec<CommentDto>, AppError> {
        let mut author_ids: Vec<UserId> = comments.iter().map(|c| c.user_id).collect();
        author_ids.sort_by_key(|id| id.into_uuid());
        author_ids.dedup();

        let names: HashMap<UserId, String> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(comments
            .into_iter()
            .map(|c| {
                let username = names.get(&c.user_id).cloned().unwrap_or_default();
                CommentDto::from_comment(c, username)
            })
            .collect())
    }
}
