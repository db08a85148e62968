use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filestore_core::error::AppError;
use filestore_core::result::AppResult;
use filestore_core::types::id::{FileId, UserId};
use filestore_core::types::pagination::{PageRequest, PagedResult};
use filestore_entity::{CreateFile, FileEntity};

use super::MemoryDatabase;
use crate::store::FileStore;

/// In-memory [`FileStore`].
#[derive(Debug, Clone)]
pub struct MemoryFileStore {
    db: MemoryDatabase,
}

impl MemoryFileStore {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn create(&self, file: CreateFile, now: DateTime<Utc>) -> AppResult<FileEntity> {
        let mut tables = self.db.tables().write().await;
        if !tables.users.contains_key(&file.user_id) {
            return Err(AppError::database("File owner does not exist"));
        }
        if tables.files.iter().any(|f| f.id == file.id) {
            return Err(AppError::conflict("File already exists"));
        }
        let row = file.into_file(now);
        tables.files.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileEntity>> {
        let tables = self.db.tables().read().await;
        Ok(tables.files.iter().find(|f| f.id == id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner: UserId,
        page: &PageRequest,
    ) -> AppResult<PagedResult<FileEntity>> {
        let tables = self.db.tables().read().await;
        let mut owned: Vec<&FileEntity> = tables
            .files
            .iter()
            .rev()
            .filter(|f| f.user_id == owner)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = owned.len() as u64;
        let items = owned
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(PagedResult::new(items, page, total))
    }

    async fn delete(&self, id: FileId) -> AppResult<bool> {
        let mut tables = self.db.tables().write().await;
        let before = tables.files.len();
        tables.files.retain(|f| f.id != id);
        if tables.files.len() == before {
            return Ok(false);
        }
        tables.shares.retain(|_, s| s.file_id != id);
        tables.comments.retain(|c| c.file_id != id);
        Ok(true)
    }
}
