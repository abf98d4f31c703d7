//! Middleware for the Stronghold API
//!
//! Request tracing and the authentication gate.

pub mod auth;
mod tracing;

pub use auth::{auth_gate, CurrentUser, ACCESS_TOKEN_COOKIE};
pub use tracing::request_tracing;
