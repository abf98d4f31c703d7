//! Building handlers (generated-pattern CRUD, gated)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Building, BuildingRequest};
use crate::state::AppState;

/// GET /buildings - List all buildings
pub async fn list_buildings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Building>>, ApiError> {
    let buildings: Vec<Building> = sqlx::query_as(
        r#"
        SELECT id, account_id, kind, level, created_at, updated_at
        FROM buildings
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(buildings))
}

/// GET /buildings/:id - Get a single building
pub async fn get_building(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Building>, ApiError> {
    let building: Building = sqlx::query_as(
        r#"
        SELECT id, account_id, kind, level, created_at, updated_at
        FROM buildings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Building not found".to_string()))?;

    Ok(Json(building))
}

/// POST /buildings - Create a building
pub async fn create_building(
    State(state): State<AppState>,
    Json(req): Json<BuildingRequest>,
) -> Result<(StatusCode, Json<Building>), ApiError> {
    let building: Building = sqlx::query_as(
        r#"
        INSERT INTO buildings (id, account_id, kind, level, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING id, account_id, kind, level, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.account_id)
    .bind(&req.kind)
    .bind(req.level)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(building)))
}

/// PUT /buildings/:id - Update a building
pub async fn update_building(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BuildingRequest>,
) -> Result<Json<Building>, ApiError> {
    let building: Building = sqlx::query_as(
        r#"
        UPDATE buildings
        SET account_id = $1, kind = $2, level = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING id, account_id, kind, level, created_at, updated_at
        "#,
    )
    .bind(req.account_id)
    .bind(&req.kind)
    .bind(req.level)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Building not found".to_string()))?;

    Ok(Json(building))
}

/// DELETE /buildings/:id - Delete a building
pub async fn delete_building(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = sqlx::query("DELETE FROM buildings WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Building not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
