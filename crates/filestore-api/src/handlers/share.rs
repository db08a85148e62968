//! Share link handlers.
//!
//! Accept and reject are anonymous: possession of the share token is the
//! credential.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use filestore_core::error::AppError;
use filestore_service::{ShareLinkDto, SharedFileDto};

use crate::dto::request::{CreateShareLinkRequest, ShareTokenRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /file/api/fileshares/create-link
pub async fn create_share_link(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateShareLinkRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShareLinkDto>>), ApiError> {
    let link = state
        .share_service
        .create_share_link(&auth, req.file_id, &req.email, req.permission)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Share link created.", link)),
    ))
}

/// POST /file/api/fileshares/accept
pub async fn accept_share(
    State(state): State<AppState>,
    body: Result<Json<ShareTokenRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let token = required_token(body)?;
    let accepted = state.share_service.accept_share(&token).await?;
    Ok(Json(ApiResponse::with_message("Share accepted.", accepted)))
}

/// POST /file/api/fileshares/reject
pub async fn reject_share(
    State(state): State<AppState>,
    body: Result<Json<ShareTokenRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let token = required_token(body)?;
    let rejected = state.share_service.reject_share(&token).await?;
    Ok(Json(ApiResponse::with_message("Share rejected.", rejected)))
}

/// GET /file/api/fileshares
pub async fn get_shared_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<SharedFileDto>>>, ApiError> {
    let files = state.share_service.get_shared_files(&auth).await?;
    Ok(Json(ApiResponse::ok(files)))
}

fn required_token(body: Result<Json<ShareTokenRequest>, JsonRejection>) -> Result<String, ApiError> {
    let Json(req) = body?;
    req.into_token()
        .ok_or_else(|| AppError::validation("Share token is required.").into())
}
