//! Mailer that records invitations in the log instead of sending mail.

use async_trait::async_trait;
use tracing::info;

use filestore_core::result::AppResult;
use filestore_core::traits::{Mailer, ShareInvitation};

/// Logs each invitation at `info` level. Stands in until an SMTP or API
/// backed mailer is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_share_invitation(&self, invitation: &ShareInvitation) -> AppResult<()> {
        info!(
            to = %invitation.to_email,
            shared_by = %invitation.shared_by,
            file_name = %invitation.file_name,
            accept_url = %invitation.accept_url,
            "Sending share invitation"
        );
        Ok(())
    }
}
