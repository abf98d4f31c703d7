//! Stronghold companion backend library
//!
//! A REST backend for a game-companion application. The interesting part
//! is the authentication core (`auth`, `middleware::auth`); the resource
//! endpoints are thin CRUD gated behind it.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{extract::State, middleware::from_fn_with_state, routing::get, Json, Router};

use state::AppState;

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

async fn root() -> &'static str {
    "Stronghold API Server"
}

/// Health check endpoint (allow-listed)
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::check_health(&state.pool).await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if database == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Assemble the application router. Every route is layered behind the
/// auth gate; the gate itself lets allow-listed paths through.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(routes::auth_routes())
        .merge(routes::account_routes())
        .merge(routes::building_routes())
        .merge(routes::troop_routes())
        .layer(from_fn_with_state(state.clone(), middleware::auth_gate))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .with_state(state)
}
