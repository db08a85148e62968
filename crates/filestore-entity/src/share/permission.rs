//! Permission granted by a share.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level a recipient receives once a share is accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "share_permission", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SharePermission {
    /// View and download.
    #[default]
    Read,
    /// View, download, and modify.
    ReadWrite,
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::ReadWrite => write!(f, "read_write"),
        }
    }
}
