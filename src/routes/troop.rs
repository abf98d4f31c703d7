//! Troop routes

use axum::{routing::get, Router};

use crate::handlers::troop;
use crate::state::AppState;

/// Create troop routes
pub fn troop_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/troops",
            get(troop::list_troops).post(troop::create_troop),
        )
        .route(
            "/troops/:id",
            get(troop::get_troop)
                .put(troop::update_troop)
                .delete(troop::delete_troop),
        )
}
