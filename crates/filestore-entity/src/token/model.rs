//! Refresh token entity model.
//!
//! Refresh tokens are never deleted. Rotation revokes the presented token
//! and records the token that replaced it, so each user's tokens form an
//! append-only chain that can be audited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filestore_core::types::id::{RefreshTokenId, UserId};

/// A server-side refresh token bound to one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Row identifier.
    pub id: RefreshTokenId,
    /// Opaque token string handed to the client (unique).
    pub token: String,
    /// Owner of the token.
    pub user_id: UserId,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
    /// Client address that obtained the token.
    pub created_by_ip: Option<String>,
    /// Instant after which the token is no longer accepted.
    pub expires_at: DateTime<Utc>,
    /// When the token was revoked, if it was.
    pub revoked_at: Option<DateTime<Utc>>,
    /// Client address that revoked the token.
    pub revoked_by_ip: Option<String>,
    /// Token string issued in exchange for this one during rotation.
    pub replaced_by_token: Option<String>,
}

impl RefreshToken {
    /// Whether the expiry instant has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// A token is active when it is neither revoked nor expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}

/// Data required to persist a freshly issued refresh token.
#[derive(Debug, Clone)]
pub struct CreateRefreshToken {
    /// Opaque token string.
    pub token: String,
    /// Owner.
    pub user_id: UserId,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Client address.
    pub created_by_ip: Option<String>,
}

impl CreateRefreshToken {
    /// Materialize the row that will be stored.
    pub fn into_token(self, now: DateTime<Utc>) -> RefreshToken {
        RefreshToken {
            id: RefreshTokenId::new(),
            token: self.token,
            user_id: self.user_id,
            created_at: now,
            created_by_ip: self.created_by_ip,
            expires_at: self.expires_at,
            revoked_at: None,
            revoked_by_ip: None,
            replaced_by_token: None,
        }
    }
}
