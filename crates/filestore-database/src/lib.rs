//! # filestore-database
//!
//! Persistence for FileStore: the store traits the services depend on,
//! PostgreSQL repositories implementing them, in-memory implementations
//! for the `memory` provider and tests, connection management and
//! embedded migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use store::{HAS_REPLIES, CommentStore, FileStore, RefreshTokenStore, ShareStore, UserStore};
pub use stores::Stores;
