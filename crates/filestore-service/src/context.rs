//! Request context carrying the authenticated caller.

use serde::{Deserialize, Serialize};

use filestore_core::types::id::UserId;
use filestore_entity::UserRole;

/// Context for the current authenticated request.
///
/// Built from verified access-token claims and passed into service methods
/// so every operation knows who is acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Email from the access token.
    pub email: String,
    /// Username from the access token.
    pub username: String,
    /// Role at the time the token was issued.
    pub role: UserRole,
    /// Client address, when known.
    pub ip_address: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        username: impl Into<String>,
        role: UserRole,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            username: username.into(),
            role,
            ip_address,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
