//! Shared utilities and common types for the LandX server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope structures
//! - Utility functions (phone validation, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AuthConfig, CacheConfig, DatabaseConfig, Environment, ServerConfig,
};
pub use types::ErrorResponse;
pub use utils::phone;
