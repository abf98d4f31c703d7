//! Access token signing and verification
//!
//! Access tokens are short-lived, stateless HS256 JWTs carrying the
//! username and role claims. The signing key is injected at construction
//! time from configuration; it is never persisted or rotated at runtime.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;

/// Token errors. All verification failures (malformed, mis-signed,
/// expired) collapse into `Invalid`; callers never learn which check
/// failed.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    Invalid,
}

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Subject (username)
    pub sub: String,
    /// Role names
    pub roles: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Symmetric signing key for access tokens
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Build the key from configuration. When no secret is configured
    /// (development only) a random per-process key is generated, which
    /// invalidates all outstanding tokens on restart.
    pub fn from_config(secret: Option<&str>) -> Self {
        match secret {
            Some(s) => Self(s.as_bytes().to_vec()),
            None => {
                tracing::warn!(
                    "JWT_SECRET not set; generated a random per-process signing key. \
                     All access tokens will be invalidated on restart."
                );
                let mut bytes = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut bytes);
                Self(bytes.to_vec())
            }
        }
    }
}

/// Stateless access token issuer/verifier
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenSigner {
    pub fn new(key: &SigningKey, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&key.0),
            decoding: DecodingKey::from_secret(&key.0),
            ttl_seconds,
        }
    }

    /// Access token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a signed access token for a user
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_seconds);

        let claims = AccessClaims {
            sub: user.username.clone(),
            roles: user.roles.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims in one call. There is no
    /// separate extract step: claims are only obtainable from a token
    /// that passed signature and expiry checks.
    pub fn decode(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<AccessClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: String::new(),
            roles: vec!["player".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_signer(ttl_seconds: i64) -> TokenSigner {
        TokenSigner::new(&SigningKey::from_config(Some("test-secret-key")), ttl_seconds)
    }

    #[test]
    fn test_issue_then_decode() {
        let signer = test_signer(3600);
        let user = test_user("alice");

        let token = signer.issue(&user).unwrap();
        let claims = signer.decode(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, vec!["player".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = test_signer(-3600);
        let token = signer.issue(&test_user("alice")).unwrap();

        assert!(signer.decode(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let signer = test_signer(3600);
        assert!(signer.decode("not.a.token").is_err());
        assert!(signer.decode("").is_err());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let signer = test_signer(3600);
        let other = TokenSigner::new(&SigningKey::from_config(Some("other-secret")), 3600);

        let token = signer.issue(&test_user("alice")).unwrap();
        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn test_random_key_per_process() {
        // Two independently generated keys must not verify each other's tokens
        let a = TokenSigner::new(&SigningKey::from_config(None), 3600);
        let b = TokenSigner::new(&SigningKey::from_config(None), 3600);

        let token = a.issue(&test_user("alice")).unwrap();
        assert!(a.decode(&token).is_ok());
        assert!(b.decode(&token).is_err());
    }
}
