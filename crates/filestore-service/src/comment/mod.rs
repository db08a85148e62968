//! Threaded comments on files.

pub mod dto;
pub mod service;
mod thread;

pub use dto::{AddComment, CommentDto};
pub use service::CommentService;
