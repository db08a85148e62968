//! Outbound mail seam used for share invitations.

use async_trait::async_trait;

use crate::result::AppResult;

/// A share invitation ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareInvitation {
    /// Recipient address.
    pub to_email: String,
    /// Username of the person sharing the file.
    pub shared_by: String,
    /// Name of the shared file.
    pub file_name: String,
    /// Link the recipient follows to accept.
    pub accept_url: String,
}

/// Sends mail on behalf of the platform.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send a share invitation.
    async fn send_share_invitation(&self, invitation: &ShareInvitation) -> AppResult<()>;
}
