//! Configuration types shared across server crates
//!
//! Each config struct reads its values from environment variables via
//! `from_env()` and carries sensible development defaults.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;
