//! Auth service: registration, login, refresh-token rotation, revocation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use filestore_core::config::AuthConfig;
use filestore_core::error::AppError;
use filestore_core::traits::Clock;
use filestore_database::{RefreshTokenStore, UserStore};
use filestore_entity::{CreateUser, User, UserRole};

use crate::jwt::JwtEncoder;
use crate::password::{PasswordHasher, PasswordValidator};

const EMAIL_TAKEN: &str = "User with this email already exists.";
const INVALID_CREDENTIALS: &str = "Invalid credentials.";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token.";
const REFRESH_TOKEN_NOT_FOUND: &str = "Refresh token not found.";

/// Token pair and identity returned by register, login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    /// Signed access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Username of the authenticated user.
    pub username: String,
    /// Email of the authenticated user.
    pub email: String,
}

/// Orchestrates the credential store and the token issuer.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn RefreshTokenStore>,
    encoder: JwtEncoder,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("encoder", &self.encoder)
            .field("validator", &self.validator)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn RefreshTokenStore>,
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            tokens,
            encoder: JwtEncoder::new(config),
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            clock,
        }
    }

    /// Registers a new account with the default role and signs it in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        ip: Option<&str>,
    ) -> Result<AuthResult, AppError> {
        self.validator.validate(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            warn!(email, "Registration rejected: email already registered");
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(
                CreateUser {
                    email: email.to_string(),
                    username: username.to_string(),
                    password_hash,
                    role: UserRole::default(),
                },
                self.clock.now(),
            )
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        self.issue(&user, ip).await
    }

    /// Verifies credentials and issues a new token pair.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip: Option<&str>,
    ) -> Result<AuthResult, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!(email, "Login failed: unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(&user, ip).await
    }

    /// Exchanges an active refresh token for a new pair.
    ///
    /// The presented token is revoked and linked to its replacement in one
    /// atomic step, so two concurrent refreshes of the same token cannot
    /// both succeed.
    pub async fn refresh_token(
        &self,
        token: &str,
        ip: Option<&str>,
    ) -> Result<AuthResult, AppError> {
        let now = self.clock.now();
        let Some(stored) = self.tokens.find_by_token(token).await? else {
            warn!("Refresh rejected: unknown token");
            return Err(AppError::unauthorized(INVALID_REFRESH_TOKEN));
        };
        if !stored.is_active(now) {
            warn!(user_id = %stored.user_id, revoked = stored.is_revoked(), "Refresh rejected: token inactive");
            return Err(AppError::unauthorized(INVALID_REFRESH_TOKEN));
        }

        let user = self
            .users
            .find_by_id(stored.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_REFRESH_TOKEN))?;

        let replacement = self.encoder.generate_refresh_token(user.id, now, ip);
        let Some(rotated) = self.tokens.rotate(token, replacement, now, ip).await? else {
            warn!(user_id = %user.id, "Refresh rejected: token rotated concurrently");
            return Err(AppError::unauthorized(INVALID_REFRESH_TOKEN));
        };

        let (access_token, _) = self.encoder.generate_access_token(&user, now)?;
        info!(user_id = %user.id, "Refresh token rotated");

        Ok(AuthResult {
            access_token,
            refresh_token: rotated.token,
            username: user.username,
            email: user.email,
        })
    }

    /// Revokes a refresh token whatever its current state.
    pub async fn revoke_token(&self, token: &str, ip: Option<&str>) -> Result<bool, AppError> {
        let revoked = self
            .tokens
            .revoke(token, self.clock.now(), ip)
            .await?
            .ok_or_else(|| AppError::not_found(REFRESH_TOKEN_NOT_FOUND))?;

        info!(user_id = %revoked.user_id, "Refresh token revoked");
        Ok(true)
    }

    async fn issue(&self, user: &User, ip: Option<&str>) -> Result<AuthResult, AppError> {
        let now = self.clock.now();
        let (access_token, _) = self.encoder.generate_access_token(user, now)?;
        let refresh = self
            .tokens
            .create(self.encoder.generate_refresh_token(user.id, now, ip), now)
            .await?;

        Ok(AuthResult {
            access_token,
            refresh_token: refresh.token,
            username: user.username.clone(),
            email: user.email.clone(),
        })
    }
}
