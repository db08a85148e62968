//! File service inputs and outputs.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filestore_core::types::id::{FileId, UserId};
use filestore_entity::FileEntity;

/// One payload of an upload batch.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original client-side file name.
    pub file_name: String,
    /// Declared MIME type; guessed from the name when absent.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// File metadata as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDto {
    pub id: FileId,
    pub file_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub description: Option<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<FileEntity> for FileDto {
    fn from(file: FileEntity) -> Self {
        Self {
            id: file.id,
            file_name: file.file_name,
            file_size: file.file_size,
            content_type: file.content_type,
            description: file.description,
            user_id: file.user_id,
            created_at: file.created_at,
        }
    }
}

/// Outcome of an upload batch. Skipped payloads are simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResult {
    pub files: Vec<FileDto>,
}
