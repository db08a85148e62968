//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded blobs are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded files.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
        }
    }
}

fn default_upload_root() -> String {
    "./data/uploads".to_string()
}
