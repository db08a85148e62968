//! Route definitions for the FileStore HTTP API.
//!
//! Paths keep the prefixes clients already use: identity routes under
//! `/identity/api`, file and share routes under `/file/api`, comments under
//! `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and per-route limits.
///
/// Cross-cutting layers (CORS, compression, tracing) are added by
/// [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.server.max_upload_size_bytes).unwrap_or(usize::MAX);

    Router::new()
        .merge(auth_routes())
        .merge(file_routes(max_upload))
        .merge(share_routes())
        .merge(comment_routes())
        .route("/health", get(handlers::health::health))
        .route("/hubs/notifications", get(handlers::ws::notifications_hub))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Identity endpoints: register, login, refresh, revoke
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/identity/api/auth/register", post(handlers::auth::register))
        .route("/identity/api/auth/login", post(handlers::auth::login))
        .route(
            "/identity/api/auth/refresh-token",
            post(handlers::auth::refresh_token),
        )
        .route(
            "/identity/api/auth/revoke-token",
            post(handlers::auth::revoke_token),
        )
}

/// File endpoints; uploads get the configured body limit
fn file_routes(max_upload: usize) -> Router<AppState> {
    let upload = Router::new()
        .route("/file/api/files/upload", post(handlers::file::upload_files))
        .layer(DefaultBodyLimit::max(max_upload));

    Router::new()
        .route("/file/api/files", get(handlers::file::list_files))
        .route(
            "/file/api/files/{id}/download",
            get(handlers::file::download_file),
        )
        .route("/file/api/files/{id}", delete(handlers::file::delete_file))
        .merge(upload)
}

/// Share link endpoints
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/file/api/fileshares", get(handlers::share::get_shared_files))
        .route(
            "/file/api/fileshares/create-link",
            post(handlers::share::create_share_link),
        )
        .route(
            "/file/api/fileshares/accept",
            post(handlers::share::accept_share),
        )
        .route(
            "/file/api/fileshares/reject",
            post(handlers::share::reject_share),
        )
}

/// Comment endpoints
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/comments", post(handlers::comment::add_comment))
        .route(
            "/api/comments/file/{file_id}",
            get(handlers::comment::get_file_comments),
        )
        .route(
            "/api/comments/file/{file_id}/thread",
            get(handlers::comment::get_comment_thread),
        )
        .route("/api/comments/{id}", delete(handlers::comment::delete_comment))
}
