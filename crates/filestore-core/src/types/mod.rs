//! Core type definitions used across the FileStore workspace.

pub mod id;
pub mod pagination;

pub use id::*;
pub use pagination::{PageRequest, PagedResult};
