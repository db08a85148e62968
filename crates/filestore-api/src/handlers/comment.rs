//! Comment handlers.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use filestore_core::types::id::{CommentId, FileId};
use filestore_service::{AddComment, CommentDto};

use crate::dto::request::AddCommentRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<AddCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentDto>>), ApiError> {
    let comment = state
        .comment_service
        .add_comment(
            &auth,
            AddComment {
                file_id: req.file_id,
                content: req.content,
                parent_comment_id: req.parent_comment_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment))))
}

/// GET /api/comments/file/{fileId}
pub async fn get_file_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    file_id: Result<Path<FileId>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<CommentDto>>>, ApiError> {
    let Path(file_id) = file_id?;
    let comments = state.comment_service.get_file_comments(file_id).await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// GET /api/comments/file/{fileId}/thread
pub async fn get_comment_thread(
    State(state): State<AppState>,
    _auth: AuthUser,
    file_id: Result<Path<FileId>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<CommentDto>>>, ApiError> {
    let Path(file_id) = file_id?;
    let thread = state.comment_service.get_comment_thread(file_id).await?;
    Ok(Json(ApiResponse::ok(thread)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<CommentId>, PathRejection>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let Path(id) = id?;
    let deleted = state.comment_service.delete_comment(&auth, id).await?;
    Ok(Json(ApiResponse::with_message("Comment deleted.", deleted)))
}
