//! Store traits the service layer depends on.
//!
//! Each trait is implemented twice: by a PostgreSQL repository in
//! [`crate::repositories`] and by an in-memory store in [`crate::memory`].
//! Operations whose correctness depends on "check then write" are expressed
//! as single conditional operations so both backends can make them atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filestore_core::result::AppResult;
use filestore_core::types::id::{CommentId, FileId, UserId};
use filestore_core::types::pagination::{PageRequest, PagedResult};
use filestore_entity::{
    Comment, CreateComment, CreateFile, CreateFileShare, CreateRefreshToken, CreateUser,
    FileEntity, FileShare, RefreshToken, User,
};

/// Persistent user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email using exact, case-sensitive comparison.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Fetch several users at once; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// Insert a user. Fails with `Conflict` if the email is taken.
    async fn create(&self, user: CreateUser, now: DateTime<Utc>) -> AppResult<User>;
}

/// Server-side refresh tokens.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a newly issued token.
    async fn create(&self, token: CreateRefreshToken, now: DateTime<Utc>)
    -> AppResult<RefreshToken>;

    /// Look up a token by its opaque string.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// All tokens ever issued to a user, oldest first.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<RefreshToken>>;

    /// Atomically exchange `old_token` for `replacement`.
    ///
    /// Succeeds only if `old_token` exists, is unrevoked, and has not expired
    /// at `now`. On success the old row is revoked with `replaced_by_token`
    /// pointing at the replacement, the replacement is inserted, and the new
    /// row is returned. Returns `None` when the guard fails, including when a
    /// concurrent rotation of the same token won the race.
    async fn rotate(
        &self,
        old_token: &str,
        replacement: CreateRefreshToken,
        now: DateTime<Utc>,
        ip: Option<&str>,
    ) -> AppResult<Option<RefreshToken>>;

    /// Mark a token revoked regardless of its current state.
    ///
    /// Returns the updated row, or `None` if no such token exists.
    async fn revoke(
        &self,
        token: &str,
        now: DateTime<Utc>,
        ip: Option<&str>,
    ) -> AppResult<Option<RefreshToken>>;
}

/// File metadata.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert file metadata.
    async fn create(&self, file: CreateFile, now: DateTime<Utc>) -> AppResult<FileEntity>;

    /// Find a file by primary key.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileEntity>>;

    /// One page of a user's files, newest first.
    async fn find_by_owner(
        &self,
        owner: UserId,
        page: &PageRequest,
    ) -> AppResult<PagedResult<FileEntity>>;

    /// Delete a file row together with its shares and comments.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: FileId) -> AppResult<bool>;
}

/// Share invitations.
#[async_trait]
pub trait ShareStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a share.
    async fn create(&self, share: CreateFileShare, now: DateTime<Utc>) -> AppResult<FileShare>;

    /// Look up a share by token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<FileShare>>;

    /// All shares of a file.
    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<FileShare>>;

    /// Accepted shares addressed to `email`, most recently accepted first.
    async fn find_accepted_for_email(&self, email: &str) -> AppResult<Vec<FileShare>>;

    /// Mark a share accepted if it is still pending at `now`.
    /// Returns the updated row, or `None` if the guard failed.
    async fn accept(&self, token: &str, now: DateTime<Utc>) -> AppResult<Option<FileShare>>;

    /// Delete a share if it is still pending at `now`.
    /// Returns the deleted row, or `None` if the guard failed.
    async fn delete_pending(&self, token: &str, now: DateTime<Utc>)
    -> AppResult<Option<FileShare>>;
}

/// Message for deleting a comment that still has replies.
pub const HAS_REPLIES: &str = "Comment has replies and cannot be deleted.";

/// Comments on files.
#[async_trait]
pub trait CommentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a comment.
    async fn create(&self, comment: CreateComment, now: DateTime<Utc>) -> AppResult<Comment>;

    /// Find a comment by primary key.
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>>;

    /// All comments on a file, oldest first.
    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<Comment>>;

    /// Delete a comment that has no replies.
    ///
    /// Returns `false` if the comment does not exist and a `Conflict` error
    /// if it still has replies.
    async fn delete_leaf(&self, id: CommentId) -> AppResult<bool>;
}
