//! Configuration for the token service

use crate::domain::entities::token::{OTP_TOKEN_EXPIRY_MINUTES, SESSION_TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret, process-wide, loaded once at startup
    pub jwt_secret: String,
    /// Session token expiry in days
    pub session_token_expiry_days: i64,
    /// Intermediate OTP token expiry in minutes
    pub otp_token_expiry_minutes: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            session_token_expiry_days: SESSION_TOKEN_EXPIRY_DAYS,
            otp_token_expiry_minutes: OTP_TOKEN_EXPIRY_MINUTES,
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with the given secret and default expiries
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}
