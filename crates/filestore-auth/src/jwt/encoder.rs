//! Access token signing and refresh token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

use filestore_core::config::AuthConfig;
use filestore_core::error::AppError;
use filestore_core::types::id::UserId;
use filestore_entity::{CreateRefreshToken, User};

use super::claims::Claims;

/// Number of random bytes behind each refresh token.
const REFRESH_TOKEN_BYTES: usize = 64;

/// Creates signed access tokens and opaque refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            access_ttl: Duration::minutes(config.access_token_ttl_minutes as i64),
            refresh_ttl: Duration::days(config.refresh_token_ttl_days as i64),
        }
    }

    /// Signs an access token for `user`, valid from `now` for the configured TTL.
    pub fn generate_access_token(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let exp = now + self.access_ttl;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, exp))
    }

    /// Generates a fresh opaque refresh token for `user_id`, ready to persist.
    pub fn generate_refresh_token(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        ip: Option<&str>,
    ) -> CreateRefreshToken {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        CreateRefreshToken {
            token: URL_SAFE_NO_PAD.encode(bytes),
            user_id,
            expires_at: now + self.refresh_ttl,
            created_by_ip: ip.map(str::to_string),
        }
    }
}
