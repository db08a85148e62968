//! Notification delivery seam.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// Kind of user-facing notification.
///
/// Serialized with the event names the web client listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Someone accepted a share of a file the recipient owns.
    FileShareAccepted,
    /// Someone commented on a file the recipient owns.
    NewComment,
}

impl NotificationKind {
    /// Event name as delivered to clients.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::FileShareAccepted => "FileShareAccepted",
            Self::NewComment => "NewComment",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Fire-and-forget delivery of a message to one user.
///
/// Implementations must not fail the calling operation: delivery problems
/// are logged, never returned.
#[async_trait]
pub trait Notifier: Send + Sync + fmt::Debug + 'static {
    /// Deliver `message` to `recipient`.
    async fn notify(&self, recipient: UserId, kind: NotificationKind, message: String);
}

/// A notifier that drops everything. Useful where no hub is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, recipient: UserId, kind: NotificationKind, _message: String) {
        tracing::trace!(%recipient, %kind, "Notification dropped (no notifier configured)");
    }
}
