//! PostgreSQL repository implementations of the store traits.

pub mod comment;
pub mod file;
pub mod share;
pub mod token;
pub mod user;

pub use comment::CommentRepository;
pub use file::FileRepository;
pub use share::ShareRepository;
pub use token::RefreshTokenRepository;
pub use user::UserRepository;

use filestore_core::error::{AppError, ErrorKind};

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == FOREIGN_KEY_VIOLATION)
}

/// Map a sqlx error to an [`AppError`], turning unique violations into
/// `Conflict` with `conflict_message`.
pub(crate) fn map_write_error(
    err: sqlx::Error,
    context: &'static str,
    conflict_message: &'static str,
) -> AppError {
    let is_unique = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if is_unique {
        AppError::with_source(ErrorKind::Conflict, conflict_message, err)
    } else {
        AppError::with_source(ErrorKind::Database, context, err)
    }
}
