//! End-to-end HTTP tests driving the full router against in-memory stores.

mod helpers;

mod auth_test;
mod comment_test;
mod file_test;
mod share_test;
