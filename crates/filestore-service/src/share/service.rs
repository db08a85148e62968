//! File share service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use filestore_core::config::ShareConfig;
use filestore_core::error::AppError;
use filestore_core::traits::{Clock, Mailer, NotificationKind, Notifier, ShareInvitation};
use filestore_core::types::id::FileId;
use filestore_database::{FileStore, ShareStore, UserStore};
use filestore_entity::{CreateFileShare, SharePermission};

use super::dto::{ShareLinkDto, SharedFileDto};
use super::link::LinkService;
use crate::context::RequestContext;

const NOT_FOUND_OR_UNAUTHORIZED: &str = "File not found or unauthorized.";
const INVALID_SHARE_TOKEN: &str = "Invalid or expired share token.";

/// Creates share links and moves them through accept or reject.
///
/// Accept and reject are authorised by possession of the token alone.
#[derive(Clone)]
pub struct FileShareService {
    files: Arc<dyn FileStore>,
    shares: Arc<dyn ShareStore>,
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    links: LinkService,
    link_ttl: Duration,
}

impl std::fmt::Debug for FileShareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileShareService")
            .field("links", &self.links)
            .field("link_ttl", &self.link_ttl)
            .finish()
    }
}

impl FileShareService {
    /// Creates a new share service.
    pub fn new(
        files: Arc<dyn FileStore>,
        shares: Arc<dyn ShareStore>,
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: &ShareConfig,
    ) -> Self {
        Self {
            files,
            shares,
            users,
            mailer,
            notifier,
            clock,
            links: LinkService::new(config.accept_url_base.clone()),
            link_ttl: Duration::days(config.link_ttl_days as i64),
        }
    }

    /// Shares a file the caller owns with `email` and sends the invitation.
    pub async fn create_share_link(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        email: &str,
        permission: SharePermission,
    ) -> Result<ShareLinkDto, AppError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .filter(|f| f.is_owned_by(ctx.user_id))
            .ok_or_else(|| AppError::not_found(NOT_FOUND_OR_UNAUTHORIZED))?;

        let now = self.clock.now();
        let share = self
            .shares
            .create(
                CreateFileShare {
                    file_id: file.id,
                    shared_with_email: email.to_string(),
                    share_token: self.links.generate_token(),
                    expires_at: now + self.link_ttl,
                    permission,
                },
                now,
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            share_id = %share.id,
            %permission,
            "Share link created"
        );

        let invitation = ShareInvitation {
            to_email: share.shared_with_email.clone(),
            shared_by: ctx.username.clone(),
            file_name: file.file_name,
            accept_url: self.links.accept_url(&share.share_token),
        };
        if let Err(e) = self.mailer.send_share_invitation(&invitation).await {
            warn!(share_id = %share.id, error = %e, "Share invitation could not be sent");
        }

        Ok(ShareLinkDto::from(share))
    }

    /// Accepts a pending share and tells the file owner.
    pub async fn accept_share(&self, token: &str) -> Result<bool, AppError> {
        let share = self
            .shares
            .accept(token, self.clock.now())
            .await?
            .ok_or_else(|| AppError::validation(INVALID_SHARE_TOKEN))?;

        info!(share_id = %share.id, file_id = %share.file_id, "Share accepted");

        if let Some(file) = self.files.find_by_id(share.file_id).await? {
            self.notifier
                .notify(
                    file.user_id,
                    NotificationKind::FileShareAccepted,
                    format!(
                        "{} accepted your share of '{}'.",
                        share.shared_with_email, file.file_name
                    ),
                )
                .await;
        }

        Ok(true)
    }

    /// Rejects a pending share, deleting it.
    pub async fn reject_share(&self, token: &str) -> Result<bool, AppError> {
        let share = self
            .shares
            .delete_pending(token, self.clock.now())
            .await?
            .ok_or_else(|| AppError::validation(INVALID_SHARE_TOKEN))?;

        info!(share_id = %share.id, file_id = %share.file_id, "Share rejected");
        Ok(true)
    }

    /// Accepted shares addressed to the caller's email.
    pub async fn get_shared_files(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<SharedFileDto>, AppError> {
        let shares = self.shares.find_accepted_for_email(&ctx.email).await?;

        let mut files = HashMap::new();
        for share in &shares {
            if !files.contains_key(&share.file_id) {
                if let Some(file) = self.files.find_by_id(share.file_id).await? {
                    files.insert(file.id, file);
                }
            }
        }

        let owner_ids: Vec<_> = files.values().map(|f| f.user_id).collect();
        let owners: HashMap<_, _> = self
            .users
            .find_by_ids(&owner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(shares
            .into_iter()
            .filter_map(|share| {
                let file = files.get(&share.file_id)?;
                Some(SharedFileDto {
                    id: share.id,
                    file_id: share.file_id,
                    file_name: file.file_name.clone(),
                    shared_by: owners.get(&file.user_id).cloned().unwrap_or_default(),
                    shared_at: share.created_at,
                    share_token: share.share_token,
                    is_accepted: share.is_accepted,
                    permission: share.permission,
                })
            })
            .collect())
    }
}
