//! # filestore-service
//!
//! Business logic service layer for FileStore. Each service orchestrates
//! stores, the blob storage provider, and the notification and mail
//! collaborators to implement one application-level use case family.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod comment;
pub mod context;
pub mod file;
pub mod notification;
pub mod share;

pub use comment::{AddComment, CommentDto, CommentService};
pub use context::RequestContext;
pub use file::{FileDto, FileService, UploadFile, UploadResult};
pub use notification::LogMailer;
pub use share::{FileShareService, LinkService, ShareLinkDto, SharedFileDto};
