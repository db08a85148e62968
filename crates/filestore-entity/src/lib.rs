//! # filestore-entity
//!
//! Domain entity models for FileStore. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! derive `sqlx::FromRow` so the PostgreSQL repositories can map them
//! directly, and `Serialize`/`Deserialize` for the in-memory stores and DTOs.

pub mod comment;
pub mod file;
pub mod share;
pub mod token;
pub mod user;

pub use comment::{Comment, CreateComment};
pub use file::{CreateFile, FileEntity};
pub use share::{CreateFileShare, FileShare, SharePermission};
pub use token::{CreateRefreshToken, RefreshToken};
pub use user::{CreateUser, User, UserRole};
