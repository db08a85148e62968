//! Share links: creation, acceptance, rejection and the recipient's inbox.

pub mod dto;
pub mod link;
pub mod service;

pub use dto::{ShareLinkDto, SharedFileDto};
pub use link::LinkService;
pub use service::FileShareService;
