//! In-game account handlers (generated-pattern CRUD, gated)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{Account, AccountRequest};
use crate::state::AppState;

/// GET /accounts - List the current user's in-game accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts: Vec<Account> = sqlx::query_as(
        r#"
        SELECT id, user_id, realm, created_at, updated_at
        FROM accounts
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user.0.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(accounts))
}

/// GET /accounts/:id - Get a single in-game account
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Account>, ApiError> {
    let account: Account = sqlx::query_as(
        r#"
        SELECT id, user_id, realm, created_at, updated_at
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    Ok(Json(account))
}

/// POST /accounts - Create an in-game account for the current user
pub async fn create_account(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<AccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account: Account = sqlx::query_as(
        r#"
        INSERT INTO accounts (id, user_id, realm, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        RETURNING id, user_id, realm, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.0.id)
    .bind(&req.realm)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// PUT /accounts/:id - Update an in-game account
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let account: Account = sqlx::query_as(
        r#"
        UPDATE accounts
        SET realm = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, user_id, realm, created_at, updated_at
        "#,
    )
    .bind(&req.realm)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    Ok(Json(account))
}

/// DELETE /accounts/:id - Delete an in-game account
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Account not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
