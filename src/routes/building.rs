//! Building routes

use axum::{routing::get, Router};

use crate::handlers::building;
use crate::state::AppState;

/// Create building routes
pub fn building_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/buildings",
            get(building::list_buildings).post(building::create_building),
        )
        .route(
            "/buildings/:id",
            get(building::get_building)
                .put(building::update_building)
                .delete(building::delete_building),
        )
}
