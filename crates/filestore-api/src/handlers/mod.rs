//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod comment;
pub mod file;
pub mod health;
pub mod share;
pub mod ws;
