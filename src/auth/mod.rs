//! Authentication core
//!
//! - Password hashing and verification (PBKDF2, salted)
//! - Stateless signed access tokens
//! - Persisted refresh tokens with rotation-on-issue
//! - Session orchestration (login, refresh, logout)

pub mod jwt;
pub mod password;
mod refresh;
mod service;

pub use jwt::{AccessClaims, SigningKey, TokenSigner};
pub use refresh::RefreshTokenStore;
pub use service::{AuthError, AuthService};
