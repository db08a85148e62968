//! # filestore-realtime
//!
//! Real-time notifications for FileStore. Each user has one broadcast
//! group (`user_{id}`); every open WebSocket of that user subscribes to it.
//! The hub implements [`filestore_core::traits::Notifier`], so services
//! publish through it without knowing about sockets.

pub mod hub;
pub mod message;

pub use hub::NotificationHub;
pub use message::NotificationMessage;
