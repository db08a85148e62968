//! # filestore-core
//!
//! Core crate for FileStore. Contains the configuration schema, typed
//! identifiers, pagination types, the clock abstraction, collaborator
//! traits (storage, notifications, mail) and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileStore crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
