//! File upload, download, listing and deletion handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use filestore_core::error::AppError;
use filestore_core::types::id::FileId;
use filestore_core::types::pagination::PagedResult;
use filestore_service::{FileDto, UploadFile, UploadResult};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Multipart text field applied as the description of every uploaded file.
const DESCRIPTION_FIELD: &str = "description";

/// POST /file/api/files/upload
///
/// Every multipart part carrying a file name is treated as one upload.
/// A request without any usable part succeeds with an empty list.
pub async fn upload_files(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResult>>, ApiError> {
    let mut batch = Vec::new();
    let mut description = None;

    while let Some(field) = multipart.next_field().await? {
        match field.file_name().map(String::from) {
            Some(file_name) => {
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await?;
                batch.push(UploadFile {
                    file_name,
                    content_type,
                    data,
                    description: None,
                });
            }
            None if field.name() == Some(DESCRIPTION_FIELD) => {
                let text = field.text().await?;
                description = Some(text).filter(|d| !d.trim().is_empty());
            }
            None => {}
        }
    }

    for file in &mut batch {
        file.description = description.clone();
    }

    let result = state.file_service.upload(&auth, batch).await?;
    let message = format!("{} file(s) uploaded.", result.files.len());

    Ok(Json(ApiResponse::with_message(message, result)))
}

/// GET /file/api/files?page=&size=
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<ApiResponse<PagedResult<FileDto>>>, ApiError> {
    let Query(params) = params?;
    let result = state
        .file_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /file/api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<FileId>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let (file, data) = state.file_service.download(&auth, id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                file.file_name.replace(['"', '\\'], "_")
            ),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// DELETE /file/api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<FileId>, PathRejection>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let Path(id) = id?;
    let deleted = state.file_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::with_message("File deleted.", deleted)))
}
