//! # filestore-storage
//!
//! Storage provider implementations for FileStore. Uploaded bytes live
//! on the local filesystem under a configured root; metadata lives in
//! the database.

pub mod providers;

pub use providers::local::LocalStorageProvider;
