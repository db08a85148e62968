//! Auth handlers: register, login, refresh, revoke.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};

use filestore_auth::AuthResult;
use filestore_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, client_ip};
use crate::state::AppState;

/// POST /identity/api/auth/register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResult>>), ApiError> {
    let ip = client_ip(&headers);
    let result = state
        .auth_service
        .register(&req.username, &req.email, &req.password, ip.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Registration successful.", result)),
    ))
}

/// POST /identity/api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResult>>, ApiError> {
    let ip = client_ip(&headers);
    let result = state
        .auth_service
        .login(&req.email, &req.password, ip.as_deref())
        .await?;

    Ok(Json(ApiResponse::with_message("Login successful.", result)))
}

/// POST /identity/api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthResult>>, ApiError> {
    let token = required_token(body)?;
    let ip = client_ip(&headers);
    let result = state
        .auth_service
        .refresh_token(&token, ip.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(result)))
}

/// POST /identity/api/auth/revoke-token
pub async fn revoke_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let token = required_token(body)?;
    let ip = client_ip(&headers);
    let revoked = state
        .auth_service
        .revoke_token(&token, ip.as_deref())
        .await?;

    Ok(Json(ApiResponse::with_message("Token revoked.", revoked)))
}

fn required_token(body: Result<Json<RefreshTokenRequest>, JsonRejection>) -> Result<String, ApiError> {
    let Json(req) = body?;
    req.into_token()
        .ok_or_else(|| AppError::validation("Refresh token is required.").into())
}
