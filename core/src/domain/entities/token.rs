//! Token claims for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token expiration time (30 days)
pub const SESSION_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Intermediate OTP token expiration time (5 minutes)
pub const OTP_TOKEN_EXPIRY_MINUTES: i64 = 5;

/// JWT issuer
pub const JWT_ISSUER: &str = "landx";

/// What a token authorizes
///
/// `Session` tokens carry ordinary request authorization. `Otp` tokens are
/// the short-lived proof that an OTP check just succeeded; they are only
/// accepted by the final phase of signup and PIN reset, never by the bearer
/// middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    Session,
    Otp,
}

/// Claims structure for the JWT payload
///
/// The phone number is the sole identity claim; ordinary request
/// authorization needs no database round-trip. The tradeoff is that a token
/// stays valid until natural expiry even if the PIN is changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (phone number)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// What this token authorizes
    pub scope: TokenScope,
}

impl Claims {
    fn new(phone_number: &str, scope: TokenScope, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: phone_number.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
            scope,
        }
    }

    /// Creates claims for a long-lived session token
    pub fn new_session_token(phone_number: &str, expiry_days: i64) -> Self {
        Self::new(phone_number, TokenScope::Session, Duration::days(expiry_days))
    }

    /// Creates claims for a short-lived intermediate OTP token
    pub fn new_otp_token(phone_number: &str, expiry_minutes: i64) -> Self {
        Self::new(phone_number, TokenScope::Otp, Duration::minutes(expiry_minutes))
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the phone number from the claims
    pub fn phone_number(&self) -> &str {
        &self.sub
    }
}
