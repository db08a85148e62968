//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use filestore_core::types::id::{CommentId, FileId};
use filestore_entity::SharePermission;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display username.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Login email; must be unique.
    #[validate(email(message = "Email is not a valid address"))]
    pub email: String,
    /// Plain-text password; policy is enforced by the auth service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body of refresh and revoke calls: a bare JSON string or an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefreshTokenRequest {
    /// `"token"`
    Bare(String),
    /// `{ "refresh_token": "token" }`
    Wrapped {
        #[serde(alias = "refreshToken")]
        refresh_token: String,
    },
}

impl RefreshTokenRequest {
    /// The token, rejecting blank values.
    pub fn into_token(self) -> Option<String> {
        let token = match self {
            Self::Bare(token) | Self::Wrapped { refresh_token: token } => token,
        };
        let trimmed = token.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Body of accept and reject calls: a bare JSON string or an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShareTokenRequest {
    /// `"token"`
    Bare(String),
    /// `{ "share_token": "token" }`
    Wrapped {
        #[serde(alias = "shareToken", alias = "token")]
        share_token: String,
    },
}

impl ShareTokenRequest {
    /// The token, rejecting blank values.
    pub fn into_token(self) -> Option<String> {
        let token = match self {
            Self::Bare(token) | Self::Wrapped { share_token: token } => token,
        };
        let trimmed = token.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Create share link request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareLinkRequest {
    /// File to share; must be owned by the caller.
    #[serde(alias = "fileId")]
    pub file_id: FileId,
    /// Recipient address.
    #[validate(email(message = "Email is not a valid address"))]
    pub email: String,
    /// Access level, `read` unless given.
    #[serde(default)]
    pub permission: SharePermission,
}

/// Add comment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddCommentRequest {
    /// File being commented on.
    #[serde(alias = "fileId")]
    pub file_id: FileId,
    /// Comment text.
    #[validate(length(min = 1, max = 2000, message = "Content must be 1 to 2000 characters"))]
    pub content: String,
    /// Comment being replied to.
    #[serde(default, alias = "parentCommentId")]
    pub parent_comment_id: Option<CommentId>,
}
