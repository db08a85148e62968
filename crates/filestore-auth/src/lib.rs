//! # filestore-auth
//!
//! Authentication for FileStore.
//!
//! ## Modules
//!
//! - `jwt`: access token creation and validation, opaque refresh token generation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `service`: registration, login, refresh-token rotation and revocation

pub mod jwt;
pub mod password;
pub mod service;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use service::{AuthResult, AuthService};
