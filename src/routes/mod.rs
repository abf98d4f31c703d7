//! Route definitions for the Stronghold API

mod account;
mod auth;
mod building;
mod troop;

pub use account::account_routes;
pub use auth::auth_routes;
pub use building::building_routes;
pub use troop::troop_routes;
