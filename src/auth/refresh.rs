//! Refresh token persistence and exchange
//!
//! Refresh tokens are long-lived, opaque, and persisted. The table has a
//! unique constraint on `user_id`, so issuing a new token atomically
//! replaces the previous one (at most one live refresh token per user,
//! with no delete-then-insert race). Exchanging a valid refresh token
//! mints a new access token; the refresh token itself is left unchanged.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{RefreshToken, User};

use super::jwt::TokenSigner;
use super::service::AuthError;

/// Persistence-backed refresh token store
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: PgPool,
    signer: TokenSigner,
    ttl_days: i64,
}

impl RefreshTokenStore {
    pub fn new(pool: PgPool, signer: TokenSigner, ttl_days: i64) -> Self {
        Self {
            pool,
            signer,
            ttl_days,
        }
    }

    /// Issue a new refresh token for a user, replacing any existing one.
    ///
    /// The upsert keyed on `user_id` makes rotation-on-issue a single
    /// atomic statement even under concurrent logins.
    pub async fn issue(&self, user: &User) -> Result<RefreshToken, AuthError> {
        let token: RefreshToken = sqlx::query_as(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET token = EXCLUDED.token,
                expires_at = EXCLUDED.expires_at,
                created_at = NOW()
            RETURNING id, user_id, token, expires_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(Uuid::new_v4().to_string())
        .bind(Utc::now() + Duration::days(self.ttl_days))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = %user.id, "Issued refresh token");

        Ok(token)
    }

    /// Exchange a refresh token string for a new access token.
    ///
    /// Unknown tokens fail with `InvalidRefreshToken`. Expired tokens are
    /// deleted on detection and fail with `RefreshTokenExpired`; a retry
    /// with the same string then fails with `InvalidRefreshToken`.
    pub async fn exchange(&self, token_str: &str) -> Result<String, AuthError> {
        let token: RefreshToken = sqlx::query_as(
            r#"
            SELECT id, user_id, token, expires_at, created_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token_str)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::InvalidRefreshToken)?;

        if token.is_expired() {
            sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
                .bind(token.id)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::RefreshTokenExpired);
        }

        let user: User = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, roles, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(token.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::InvalidRefreshToken)?;

        Ok(self.signer.issue(&user)?)
    }

    /// Delete all refresh tokens for a user. Idempotent.
    pub async fn revoke(&self, user_id: Uuid) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(user_id = %user_id, "Revoked refresh tokens");

        Ok(())
    }
}
