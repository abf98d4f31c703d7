//! HTTP handlers for the Stronghold API

pub mod account;
pub mod auth;
pub mod building;
pub mod troop;
