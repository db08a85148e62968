//! File share entities.

pub mod model;
pub mod permission;

pub use model::{CreateFileShare, FileShare};
pub use permission::SharePermission;
