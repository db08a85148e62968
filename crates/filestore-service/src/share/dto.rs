//! Share service outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filestore_core::types::id::{FileId, ShareId};
use filestore_entity::{FileShare, SharePermission};

/// A freshly created share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinkDto {
    pub id: ShareId,
    pub file_id: FileId,
    pub shared_with_email: String,
    pub share_token: String,
    pub expires_at: DateTime<Utc>,
    pub permission: SharePermission,
}

impl From<FileShare> for ShareLinkDto {
    fn from(share: FileShare) -> Self {
        Self {
            id: share.id,
            file_id: share.file_id,
            shared_with_email: share.shared_with_email,
            share_token: share.share_token,
            expires_at: share.expires_at,
            permission: share.permission,
        }
    }
}

/// A file someone shared with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFileDto {
    pub id: ShareId,
    pub file_id: FileId,
    pub file_name: String,
    /// Username of the file owner.
    pub shared_by: String,
    /// When the share was created.
    pub shared_at: DateTime<Utc>,
    pub share_token: String,
    pub is_accepted: bool,
    pub permission: SharePermission,
}
