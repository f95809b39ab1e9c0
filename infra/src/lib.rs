//! # Infrastructure Layer
//!
//! Concrete implementations of the interfaces the core defines:
//! - **Database**: MySQL repositories using SQLx
//! - **OTP**: Twilio Verify gateway over HTTPS
//! - **Services**: Redis-backed rate limiter

use thiserror::Error;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// OTP gateway module - Twilio Verify integration
pub mod otp;

/// Services module - infrastructure service implementations
pub mod services;

/// Errors raised while constructing infrastructure components
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),
}
