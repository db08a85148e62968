//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filestore_core::types::id::{FileId, UserId};

/// Metadata for one uploaded file. The bytes live in the storage provider
/// at `file_path`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileEntity {
    /// Unique file identifier.
    pub id: FileId,
    /// Original file name as uploaded.
    pub file_name: String,
    /// Path within the storage provider.
    pub file_path: String,
    /// Size in bytes.
    pub file_size: i64,
    /// MIME type.
    pub content_type: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The single owner of the file.
    pub user_id: UserId,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the metadata was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FileEntity {
    /// Whether `user_id` owns this file.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to insert file metadata.
#[derive(Debug, Clone)]
pub struct CreateFile {
    /// Identifier chosen by the caller (it also names the stored blob).
    pub id: FileId,
    /// Original file name.
    pub file_name: String,
    /// Storage path.
    pub file_path: String,
    /// Size in bytes.
    pub file_size: i64,
    /// MIME type.
    pub content_type: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owner.
    pub user_id: UserId,
}

impl CreateFile {
    /// Materialize the row that will be stored.
    pub fn into_file(self, now: DateTime<Utc>) -> FileEntity {
        FileEntity {
            id: self.id,
            file_name: self.file_name,
            file_path: self.file_path,
            file_size: self.file_size,
            content_type: self.content_type,
            description: self.description,
            user_id: self.user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_named(name: &str) -> FileEntity {
        CreateFile {
            id: FileId::new(),
            file_name: name.into(),
            file_path: "x".into(),
            file_size: 1,
            content_type: "application/octet-stream".into(),
            description: None,
            user_id: UserId::new(),
        }
        .into_file(Utc::now())
    }

    #[test]
    fn test_extension() {
        assert_eq!(file_named("Report.PDF").extension().as_deref(), Some("pdf"));
        assert_eq!(file_named("archive.tar.gz").extension().as_deref(), Some("gz"));
        assert_eq!(file_named("README").extension(), None);
        assert_eq!(file_named("trailing.").extension(), None);
    }

    #[test]
    fn test_ownership() {
        let file = file_named("a.txt");
        assert!(file.is_owned_by(file.user_id));
        assert!(!file.is_owned_by(UserId::new()));
    }
}
