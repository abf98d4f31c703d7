//! In-game account routes

use axum::{routing::get, Router};

use crate::handlers::account;
use crate::state::AppState;

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            get(account::list_accounts).post(account::create_account),
        )
        .route(
            "/accounts/:id",
            get(account::get_account)
                .put(account::update_account)
                .delete(account::delete_account),
        )
}
