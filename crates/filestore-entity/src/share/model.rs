//! File share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filestore_core::types::id::{FileId, ShareId};

use super::permission::SharePermission;

/// An invitation for someone (identified by email) to access a file.
///
/// The share token is the only credential needed to accept or reject.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileShare {
    /// Unique share identifier.
    pub id: ShareId,
    /// The shared file.
    pub file_id: FileId,
    /// Recipient address.
    pub shared_with_email: String,
    /// Opaque token (unique).
    pub share_token: String,
    /// After this instant the share can no longer be accepted or rejected.
    pub expires_at: DateTime<Utc>,
    /// When the recipient accepted.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Whether the recipient accepted.
    pub is_accepted: bool,
    /// Access level granted.
    pub permission: SharePermission,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl FileShare {
    /// Whether the expiry instant has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// A share can be accepted or rejected only while it is unaccepted and
    /// unexpired.
    pub fn is_pending(&self, now: DateTime<Utc>) -> bool {
        !self.is_accepted && !self.is_expired(now)
    }
}

/// Data required to create a share.
#[derive(Debug, Clone)]
pub struct CreateFileShare {
    /// The shared file.
    pub file_id: FileId,
    /// Recipient address.
    pub shared_with_email: String,
    /// Opaque token.
    pub share_token: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Access level.
    pub permission: SharePermission,
}

impl CreateFileShare {
    /// Materialize the row that will be stored.
    pub fn into_share(self, now: DateTime<Utc>) -> FileShare {
        FileShare {
            id: ShareId::new(),
            file_id: self.file_id,
            shared_with_email: self.shared_with_email,
            share_token: self.share_token,
            expires_at: self.expires_at,
            accepted_at: None,
            is_accepted: false,
            permission: self.permission,
            created_at: now,
        }
    }
}
