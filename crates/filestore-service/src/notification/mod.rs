//! Outbound notification collaborators.

pub mod mailer;

pub use mailer::LogMailer;
