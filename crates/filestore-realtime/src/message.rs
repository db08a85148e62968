//! Wire format of notifications pushed to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filestore_core::error::AppError;
use filestore_core::traits::NotificationKind;

/// A notification as delivered over the socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Event name, e.g. `FileShareAccepted` or `NewComment`.
    pub event: String,
    /// Human-readable text.
    pub message: String,
    /// When the notification was produced.
    pub timestamp: DateTime<Utc>,
}

impl NotificationMessage {
    /// Builds a message for `kind`.
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event: kind.event_name().to_string(),
            message: message.into(),
            timestamp,
        }
    }

    /// Serializes to the JSON text frame sent to clients.
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}
