//! Shared application state passed to every handler.

use std::sync::Arc;

use filestore_auth::{AuthService, JwtDecoder};
use filestore_core::config::AppConfig;
use filestore_core::traits::{Clock, StorageProvider};
use filestore_database::Stores;
use filestore_realtime::NotificationHub;
use filestore_service::{CommentService, FileService, FileShareService};

/// Application state cloned into each request.
///
/// Every field is an `Arc` (or a cheap handle) so cloning per request
/// costs a handful of reference-count bumps.
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration.
    pub config: Arc<AppConfig>,
    /// Persistence handles.
    pub stores: Stores,
    /// Blob storage for uploaded content.
    pub storage: Arc<dyn StorageProvider>,
    /// Time source shared by all services.
    pub clock: Arc<dyn Clock>,
    /// Access-token verification.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Registration, login and refresh-token lifecycle.
    pub auth_service: Arc<AuthService>,
    /// Upload, download, listing and deletion.
    pub file_service: Arc<FileService>,
    /// Share links.
    pub share_service: Arc<FileShareService>,
    /// Comments.
    pub comment_service: Arc<CommentService>,
    /// Per-user notification channels.
    pub notification_hub: Arc<NotificationHub>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("bind", &self.config.server.bind_address())
            .field("storage", &self.storage.provider_type())
            .finish()
    }
}
