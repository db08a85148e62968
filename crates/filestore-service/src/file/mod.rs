//! File upload, download, listing and deletion.

pub mod dto;
pub mod service;

pub use dto::{FileDto, UploadFile, UploadResult};
pub use service::FileService;
