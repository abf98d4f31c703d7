//! Data models for the Stronghold companion backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod auth;
pub use auth::*;

/// User model (the authenticated principal)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            roles: user.roles,
            created_at: user.created_at,
        }
    }
}

/// In-game account tracked for a user
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub realm: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Building on an in-game account
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Building {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: String,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Troop contingent on an in-game account
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Troop {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: String,
    pub level: i32,
    pub count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create or update an in-game account
#[derive(Debug, Deserialize)]
pub struct AccountRequest {
    pub realm: String,
}

/// Request to create or update a building
#[derive(Debug, Deserialize)]
pub struct BuildingRequest {
    pub account_id: Uuid,
    pub kind: String,
    pub level: i32,
}

/// Request to create or update a troop contingent
#[derive(Debug, Deserialize)]
pub struct TroopRequest {
    pub account_id: Uuid,
    pub kind: String,
    pub level: i32,
    pub count: i32,
}
