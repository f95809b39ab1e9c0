//! Authentication configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// Session token expiry in days
    pub session_token_expiry_days: i64,

    /// Intermediate OTP token expiry in minutes
    pub otp_token_expiry_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("dev-secret-change-in-production"),
            session_token_expiry_days: 30,
            otp_token_expiry_minutes: 5,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            session_token_expiry_days: std::env::var("SESSION_TOKEN_EXPIRY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_token_expiry_days),
            otp_token_expiry_minutes: std::env::var("OTP_TOKEN_EXPIRY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.otp_token_expiry_minutes),
        }
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == "dev-secret-change-in-production"
    }
}
