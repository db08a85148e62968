//! # filestore-api
//!
//! HTTP layer for FileStore built on Axum. Routes follow the public
//! surface of the identity, file and comment services and share a single
//! [`AppState`]. Errors from the lower layers are rendered through
//! [`error::ApiError`] into a tagged JSON envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
