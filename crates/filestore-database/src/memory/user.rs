use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filestore_core::error::AppError;
use filestore_core::result::AppResult;
use filestore_core::types::id::UserId;
use filestore_entity::{CreateUser, User};

use super::MemoryDatabase;
use crate::store::UserStore;

/// In-memory [`UserStore`].
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    db: MemoryDatabase,
}

impl MemoryUserStore {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.db.tables().read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.db.tables().read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        let tables = self.db.tables().read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn create(&self, user: CreateUser, now: DateTime<Utc>) -> AppResult<User> {
        let mut tables = self.db.tables().write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("User with this email already exists."));
        }
        let row = user.into_user(now);
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }
}
