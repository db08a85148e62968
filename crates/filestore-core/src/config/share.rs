//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Share link lifetime and invitation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Days a share link stays acceptable after creation.
    #[serde(default = "default_link_ttl_days")]
    pub link_ttl_days: u64,
    /// Base URL of the page that accepts share tokens; the token is appended
    /// as `?token=` in invitation mails.
    #[serde(default = "default_accept_url_base")]
    pub accept_url_base: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            link_ttl_days: default_link_ttl_days(),
            accept_url_base: default_accept_url_base(),
        }
    }
}

fn default_link_ttl_days() -> u64 {
    7
}

fn default_accept_url_base() -> String {
    "http://localhost:3000/share/accept".to_string()
}
