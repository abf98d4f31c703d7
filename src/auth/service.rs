//! Session service
//!
//! Orchestrates login, registration, refresh-token exchange, and logout.
//! This is the only component that mints or revokes tokens; everything
//! else either calls into it or is gated by the auth middleware.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{AuthTokensResponse, User};

use super::jwt::{TokenError, TokenSigner};
use super::password::{self, PasswordError};
use super::refresh::RefreshTokenStore;

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token error: {0}")]
    Token(String),

    #[error("Password error: {0}")]
    Password(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::Database(e.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        AuthError::Token(e.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Password(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::UsernameTaken => ApiError::Conflict("Username already taken".to_string()),
            // Unknown and expired refresh tokens are indistinguishable to clients
            AuthError::InvalidRefreshToken | AuthError::RefreshTokenExpired => {
                ApiError::Unauthorized("Invalid refresh token".to_string())
            }
            AuthError::Token(msg) | AuthError::Password(msg) => ApiError::InternalError(msg),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

/// Authentication and session lifecycle service
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    signer: TokenSigner,
    refresh_store: RefreshTokenStore,
}

impl AuthService {
    pub fn new(pool: PgPool, signer: TokenSigner, refresh_ttl_days: i64) -> Self {
        let refresh_store = RefreshTokenStore::new(pool.clone(), signer.clone(), refresh_ttl_days);
        Self {
            pool,
            signer,
            refresh_store,
        }
    }

    /// Access the token signer (used by the auth gate)
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Register a new user with the default `player` role
    pub async fn register(&self, username: &str, raw_password: &str) -> Result<User, AuthError> {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = password::encode(raw_password)?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, password_hash, roles, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, username, password_hash, roles, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(&password_hash)
        .bind(vec!["player".to_string()])
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(username = %user.username, "Registered user");

        Ok(user)
    }

    /// Verify credentials and issue a fresh access/refresh token pair.
    ///
    /// Issuing the refresh token implicitly revokes any prior one for
    /// this user (rotation-on-issue).
    pub async fn login(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<AuthTokensResponse, AuthError> {
        let user = self
            .find_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !password::matches(raw_password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.signer.issue(&user)?;
        let refresh_token = self.refresh_store.issue(&user).await?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(AuthTokensResponse {
            access_token,
            refresh_token: refresh_token.token,
            token_type: "Bearer".to_string(),
            expires_in: self.signer.ttl_seconds(),
        })
    }

    /// Exchange a refresh token for a new access token. The refresh token
    /// itself is echoed back unchanged; only access tokens are reissued.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokensResponse, AuthError> {
        let access_token = self.refresh_store.exchange(refresh_token).await?;

        Ok(AuthTokensResponse {
            access_token,
            refresh_token: refresh_token.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: self.signer.ttl_seconds(),
        })
    }

    /// Revoke all refresh tokens for a user (logout). Idempotent.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AuthError> {
        self.refresh_store.revoke(user_id).await
    }

    /// Look up a user by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, roles, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Look up a user by id
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<User, AuthError> {
        sqlx::query_as(
            r#"
            SELECT id, username, password_hash, roles, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::UserNotFound)
    }
}
