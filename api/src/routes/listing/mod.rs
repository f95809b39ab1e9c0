//! Listing routes.

pub mod create;
pub mod fetch;
pub mod update_access;
pub mod user_listings;
