//! Comment entities.

pub mod model;

pub use model::{Comment, CreateComment};
