use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filestore_core::error::AppError;
use filestore_core::result::AppResult;
use filestore_core::types::id::UserId;
use filestore_entity::{CreateRefreshToken, RefreshToken};

use super::MemoryDatabase;
use crate::store::RefreshTokenStore;

/// In-memory [`RefreshTokenStore`].
#[derive(Debug, Clone)]
pub struct MemoryRefreshTokenStore {
    db: MemoryDatabase,
}

impl MemoryRefreshTokenStore {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn create(
        &self,
        token: CreateRefreshToken,
        now: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        let mut tables = self.db.tables().write().await;
        if tables.refresh_tokens.contains_key(&token.token) {
            return Err(AppError::conflict("Refresh token collision"));
        }
        let row = token.into_token(now);
        tables.refresh_tokens.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.db.tables().read().await.refresh_tokens.get(token).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<RefreshToken>> {
        let tables = self.db.tables().read().await;
        let mut tokens: Vec<RefreshToken> = tables
            .refresh_tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tokens.sort_by_key(|t| (t.created_at, t.id.into_uuid()));
        Ok(tokens)
    }

    async fn rotate(
        &self,
        old_token: &str,
        replacement: CreateRefreshToken,
        now: DateTime<Utc>,
        ip: Option<&str>,
    ) -> AppResult<Option<RefreshToken>> {
        let mut tables = self.db.tables().write().await;
        if tables.refresh_tokens.contains_key(&replacement.token) {
            return Err(AppError::conflict("Refresh token collision"));
        }

        let Some(old) = tables.refresh_tokens.get_mut(old_token) else {
            return Ok(None);
        };
        if !old.is_active(now) {
            return Ok(None);
        }
        old.revoked_at = Some(now);
        old.revoked_by_ip = ip.map(str::to_string);
        old.replaced_by_token = Some(replacement.token.clone());

        let row = replacement.into_token(now);
        tables.refresh_tokens.insert(row.token.clone(), row.clone());
        Ok(Some(row))
    }

    async fn revoke(
        &self,
        token: &str,
        now: DateTime<Utc>,
        ip: Option<&str>,
    ) -> AppResult<Option<RefreshToken>> {
        let mut tables = self.db.tables().write().await;
        Ok(tables.refresh_tokens.get_mut(token).map(|row| {
            row.revoked_at = Some(now);
            row.revoked_by_ip = ip.map(str::to_string);
            row.clone()
        }))
    }
}
