//! Per-user broadcast groups.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use filestore_core::config::NotificationConfig;
use filestore_core::traits::{Clock, NotificationKind, Notifier};
use filestore_core::types::id::UserId;

use crate::message::NotificationMessage;

/// Thread-safe registry of one broadcast channel per user.
///
/// A user with several open connections receives every message on each.
/// Messages for users with no open connection are dropped.
pub struct NotificationHub {
    /// User ID → sender of that user's group.
    groups: DashMap<UserId, broadcast::Sender<NotificationMessage>>,
    /// Capacity of each group's buffer.
    buffer_size: usize,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("groups", &self.groups.len())
            .field("buffer_size", &self.buffer_size)
            .finish()
    }
}

impl NotificationHub {
    /// Creates an empty hub.
    pub fn new(config: &NotificationConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            groups: DashMap::new(),
            buffer_size: config.channel_buffer_size.max(1),
            clock,
        }
    }

    /// Group name a user's connections join.
    pub fn group_name(user_id: UserId) -> String {
        format!("user_{user_id}")
    }

    /// Joins the user's group, creating it on first use.
    pub fn subscribe(&self, user_id: UserId) -> broadcast::Receiver<NotificationMessage> {
        let receiver = self
            .groups
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe();
        debug!(group = %Self::group_name(user_id), "Connection joined notification group");
        receiver
    }

    /// Drops the user's group once no receivers remain.
    ///
    /// Call after a connection's receiver has been dropped.
    pub fn release(&self, user_id: UserId) {
        let removed = self
            .groups
            .remove_if(&user_id, |_, sender| sender.receiver_count() == 0);
        if removed.is_some() {
            debug!(group = %Self::group_name(user_id), "Notification group closed");
        }
    }

    /// Sends `message` to every connection of `user_id`.
    ///
    /// Returns the number of connections that received it.
    pub fn publish(&self, user_id: UserId, message: NotificationMessage) -> usize {
        match self.groups.get(&user_id) {
            Some(sender) => sender.send(message).unwrap_or(0),
            None => 0,
        }
    }

    /// Users with at least one live connection.
    pub fn connected_users(&self) -> Vec<UserId> {
        self.groups
            .iter()
            .filter(|entry| entry.value().receiver_count() > 0)
            .map(|entry| *entry.key())
            .collect()
    }
}

#[async_trait]
impl Notifier for NotificationHub {
    async fn notify(&self, recipient: UserId, kind: NotificationKind, message: String) {
        let message = NotificationMessage::new(kind, message, self.clock.now());
        let delivered = self.publish(recipient, message);
        trace!(%recipient, %kind, delivered, "Notification published");
    }
}
