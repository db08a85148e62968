//! File service: owner-scoped blob and metadata management.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use filestore_core::error::AppError;
use filestore_core::traits::{Clock, StorageProvider};
use filestore_core::types::id::FileId;
use filestore_core::types::pagination::{PageRequest, PagedResult};
use filestore_database::FileStore;
use filestore_entity::{CreateFile, FileEntity};

use super::dto::{FileDto, UploadFile, UploadResult};
use crate::context::RequestContext;

const NOT_FOUND_OR_UNAUTHORIZED: &str = "File not found or unauthorized.";

/// Stores uploaded files and enforces that only owners can read or delete them.
#[derive(Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
    storage: Arc<dyn StorageProvider>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService")
            .field("storage", &self.storage.provider_type())
            .finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        storage: Arc<dyn StorageProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            files,
            storage,
            clock,
        }
    }

    /// Stores every non-empty payload of the batch and records its metadata.
    ///
    /// Empty payloads are skipped without error.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        batch: Vec<UploadFile>,
    ) -> Result<UploadResult, AppError> {
        let mut stored = Vec::with_capacity(batch.len());

        for upload in batch {
            if upload.data.is_empty() {
                debug!(file_name = %upload.file_name, "Skipping empty upload");
                continue;
            }

            let file_name = display_name(&upload.file_name);
            let id = FileId::new();
            let key = storage_key(id, &file_name);
            let content_type = upload.content_type.clone().unwrap_or_else(|| {
                mime_guess::from_path(&file_name)
                    .first_or_octet_stream()
                    .to_string()
            });
            let size = upload.data.len() as i64;

            self.storage.write(&key, upload.data).await?;

            let created = self
                .files
                .create(
                    CreateFile {
                        id,
                        file_name,
                        file_path: key.clone(),
                        file_size: size,
                        content_type,
                        description: upload.description,
                        user_id: ctx.user_id,
                    },
                    self.clock.now(),
                )
                .await;

            let file = match created {
                Ok(file) => file,
                Err(e) => {
                    if let Err(cleanup) = self.storage.delete(&key).await {
                        warn!(key, error = %cleanup, "Failed to remove blob after metadata error");
                    }
                    return Err(e);
                }
            };

            info!(
                user_id = %ctx.user_id,
                file_id = %file.id,
                file_name = %file.file_name,
                size = file.file_size,
                "File uploaded"
            );
            stored.push(FileDto::from(file));
        }

        Ok(UploadResult { files: stored })
    }

    /// Returns the metadata and content of a file the caller owns.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
    ) -> Result<(FileEntity, Bytes), AppError> {
        let file = self.owned_file(ctx, file_id).await?;
        let data = self.storage.read_bytes(&file.file_path).await?;
        debug!(user_id = %ctx.user_id, file_id = %file.id, "File downloaded");
        Ok((file, data))
    }

    /// Deletes a file the caller owns: content first, then metadata.
    ///
    /// Shares and comments on the file go with it.
    pub async fn delete(&self, ctx: &RequestContext, file_id: FileId) -> Result<bool, AppError> {
        let file = self.owned_file(ctx, file_id).await?;
        self.storage.delete(&file.file_path).await?;

        if !self.files.delete(file.id).await? {
            return Err(AppError::not_found(NOT_FOUND_OR_UNAUTHORIZED));
        }

        info!(user_id = %ctx.user_id, file_id = %file.id, "File deleted");
        Ok(true)
    }

    /// One page of the caller's files, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PagedResult<FileDto>, AppError> {
        let page = PageRequest::new(page.page, page.page_size);
        let result = self.files.find_by_owner(ctx.user_id, &page).await?;
        Ok(result.map(FileDto::from))
    }

    async fn owned_file(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
    ) -> Result<FileEntity, AppError> {
        self.files
            .find_by_id(file_id)
            .await?
            .filter(|f| f.is_owned_by(ctx.user_id))
            .ok_or_else(|| AppError::not_found(NOT_FOUND_OR_UNAUTHORIZED))
    }
}

/// Strips any client-side directory components from an uploaded name.
fn display_name(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    if last.is_empty() {
        "unnamed".to_string()
    } else {
        last.to_string()
    }
}

/// Unique storage key: the file id followed by the original extension.
fn storage_key(id: FileId, file_name: &str) -> String {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}
