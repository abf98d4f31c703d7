//! Troop handlers (generated-pattern CRUD, gated)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Troop, TroopRequest};
use crate::state::AppState;

/// GET /troops - List all troop contingents
pub async fn list_troops(State(state): State<AppState>) -> Result<Json<Vec<Troop>>, ApiError> {
    let troops: Vec<Troop> = sqlx::query_as(
        r#"
        SELECT id, account_id, kind, level, count, created_at, updated_at
        FROM troops
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(troops))
}

/// GET /troops/:id - Get a single troop contingent
pub async fn get_troop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Troop>, ApiError> {
    let troop: Troop = sqlx::query_as(
        r#"
        SELECT id, account_id, kind, level, count, created_at, updated_at
        FROM troops
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Troop not found".to_string()))?;

    Ok(Json(troop))
}

/// POST /troops - Create a troop contingent
pub async fn create_troop(
    State(state): State<AppState>,
    Json(req): Json<TroopRequest>,
) -> Result<(StatusCode, Json<Troop>), ApiError> {
    let troop: Troop = sqlx::query_as(
        r#"
        INSERT INTO troops (id, account_id, kind, level, count, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING id, account_id, kind, level, count, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.account_id)
    .bind(&req.kind)
    .bind(req.level)
    .bind(req.count)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(troop)))
}

/// PUT /troops/:id - Update a troop contingent
pub async fn update_troop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TroopRequest>,
) -> Result<Json<Troop>, ApiError> {
    let troop: Troop = sqlx::query_as(
        r#"
        UPDATE troops
        SET account_id = $1, kind = $2, level = $3, count = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING id, account_id, kind, level, count, created_at, updated_at
        "#,
    )
    .bind(req.account_id)
    .bind(&req.kind)
    .bind(req.level)
    .bind(req.count)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Troop not found".to_string()))?;

    Ok(Json(troop))
}

/// DELETE /troops/:id - Delete a troop contingent
pub async fn delete_troop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = sqlx::query("DELETE FROM troops WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Troop not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
