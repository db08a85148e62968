//! The bundle of stores handed to the service layer.

use std::sync::Arc;

use tracing::info;

use filestore_core::config::{DatabaseConfig, DatabaseProvider};
use filestore_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::repositories::{
    CommentRepository, FileRepository, RefreshTokenRepository, ShareRepository, UserRepository,
};
use crate::store::{CommentStore, FileStore, RefreshTokenStore, ShareStore, UserStore};

/// Every store the services need, backed by one provider.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Refresh tokens.
    pub tokens: Arc<dyn RefreshTokenStore>,
    /// File metadata.
    pub files: Arc<dyn FileStore>,
    /// Share invitations.
    pub shares: Arc<dyn ShareStore>,
    /// Comments.
    pub comments: Arc<dyn CommentStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Stores backed by PostgreSQL repositories sharing `pool`.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            tokens: Arc::new(RefreshTokenRepository::new(pg.clone())),
            files: Arc::new(FileRepository::new(pg.clone())),
            shares: Arc::new(ShareRepository::new(pg.clone())),
            comments: Arc::new(CommentRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Stores backed by a fresh in-memory database.
    pub fn memory() -> Self {
        Self::from_memory(&MemoryDatabase::new())
    }

    /// Stores sharing an existing in-memory database.
    pub fn from_memory(db: &MemoryDatabase) -> Self {
        Self {
            users: Arc::new(db.users()),
            tokens: Arc::new(db.refresh_tokens()),
            files: Arc::new(db.files()),
            shares: Arc::new(db.shares()),
            comments: Arc::new(db.comments()),
            pool: None,
        }
    }

    /// Open the provider selected in configuration.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => Ok(Self::postgres(DatabasePool::connect(config).await?)),
            DatabaseProvider::Memory => {
                info!("Using in-memory stores; data will not survive a restart");
                Ok(Self::memory())
            }
        }
    }

    /// Check backend connectivity. Always healthy for memory stores.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
