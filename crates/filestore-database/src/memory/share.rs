use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filestore_core::error::AppError;
use filestore_core::result::AppResult;
use filestore_core::types::id::FileId;
use filestore_entity::{CreateFileShare, FileShare};

use super::MemoryDatabase;
use crate::store::ShareStore;

/// In-memory [`ShareStore`].
#[derive(Debug, Clone)]
pub struct MemoryShareStore {
    db: MemoryDatabase,
}

impl MemoryShareStore {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn create(&self, share: CreateFileShare, now: DateTime<Utc>) -> AppResult<FileShare> {
        let mut tables = self.db.tables().write().await;
        if !tables.files.iter().any(|f| f.id == share.file_id) {
            return Err(AppError::database("Shared file does not exist"));
        }
        if tables.shares.contains_key(&share.share_token) {
            return Err(AppError::conflict("Share token collision"));
        }
        let row = share.into_share(now);
        tables.shares.insert(row.share_token.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<FileShare>> {
        Ok(self.db.tables().read().await.shares.get(token).cloned())
    }

    async fn find_by_file(&self, file_id: FileId) -> AppResult<Vec<FileShare>> {
        let tables = self.db.tables().read().await;
        let mut shares: Vec<FileShare> = tables
            .shares
            .values()
            .filter(|s| s.file_id == file_id)
            .cloned()
            .collect();
        shares.sort_by_key(|s| s.created_at);
        Ok(shares)
    }

    async fn find_accepted_for_email(&self, email: &str) -> AppResult<Vec<FileShare>> {
        let tables = self.db.tables().read().await;
        let mut shares: Vec<FileShare> = tables
            .shares
            .values()
            .filter(|s| s.is_accepted && s.shared_with_email == email)
            .cloned()
            .collect();
        shares.sort_by(|a, b| b.accepted_at.cmp(&a.accepted_at));
        Ok(shares)
    }

    async fn accept(&self, token: &str, now: DateTime<Utc>) -> AppResult<Option<FileShare>> {
        let mut tables = self.db.tables().write().await;
        Ok(tables
            .shares
            .get_mut(token)
            .filter(|s| s.is_pending(now))
            .map(|s| {
                s.is_accepted = true;
                s.accepted_at = Some(now);
                s.clone()
            }))
    }

    async fn delete_pending(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<FileShare>> {
        let mut tables = self.db.tables().write().await;
        let pending = tables.shares.get(token).is_some_and(|s| s.is_pending(now));
        if pending {
            Ok(tables.shares.remove(token))
        } else {
            Ok(None)
        }
    }
}
