//! In-memory store implementations.
//!
//! All tables live behind one lock so multi-row operations (token rotation,
//! cascading file deletes) are atomic exactly like their SQL counterparts.
//! Used by the `memory` database provider and throughout the test-suite.

mod comment;
mod file;
mod share;
mod token;
mod user;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use filestore_core::types::id::UserId;
use filestore_entity::{Comment, FileEntity, FileShare, RefreshToken, User};

pub use comment::MemoryCommentStore;
pub use file::MemoryFileStore;
pub use share::MemoryShareStore;
pub use token::MemoryRefreshTokenStore;
pub use user::MemoryUserStore;

/// Rows of every table, keyed the way lookups need them.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<UserId, User>,
    /// Keyed by token string.
    pub(crate) refresh_tokens: HashMap<String, RefreshToken>,
    /// Insertion order breaks ties between equal timestamps.
    pub(crate) files: Vec<FileEntity>,
    /// Keyed by share token.
    pub(crate) shares: HashMap<String, FileShare>,
    /// Insertion order breaks ties between equal timestamps.
    pub(crate) comments: Vec<Comment>,
}

/// A process-local database shared by the memory stores.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// User store view of this database.
    pub fn users(&self) -> MemoryUserStore {
        MemoryUserStore::new(self.clone())
    }

    /// Refresh token store view of this database.
    pub fn refresh_tokens(&self) -> MemoryRefreshTokenStore {
        MemoryRefreshTokenStore::new(self.clone())
    }

    /// File store view of this database.
    pub fn files(&self) -> MemoryFileStore {
        MemoryFileStore::new(self.clone())
    }

    /// Share store view of this database.
    pub fn shares(&self) -> MemoryShareStore {
        MemoryShareStore::new(self.clone())
    }

    /// Comment store view of this database.
    pub fn comments(&self) -> MemoryCommentStore {
        MemoryCommentStore::new(self.clone())
    }

    pub(crate) fn tables(&self) -> &RwLock<Tables> {
        &self.tables
    }
}
