//! Authentication DTOs
//!
//! Signup and forget-pin are phased negotiations over a single endpoint:
//! which optional fields are present selects the phase, mirroring how the
//! mobile client resubmits the phone number at every step.

use serde::{Deserialize, Serialize};
use validator::Validate;

use lx_core::domain::entities::listing::Listing;
use lx_core::domain::value_objects::AuthSession;

/// POST /signup — all three phases
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 8, max = 16))]
    pub phone_number: String,
    /// Present in phase 2 (OTP check)
    pub code: Option<String>,
    /// Present in phase 3 (account creation)
    pub pin: Option<String>,
    /// Required alongside `pin`
    pub display_name: Option<String>,
    /// Intermediate token from phase 2, required alongside `pin`
    pub otp_token: Option<String>,
}

/// POST /signin
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 8, max = 16))]
    pub phone_number: String,
    #[validate(length(min = 4, max = 4))]
    pub pin: String,
}

/// POST /forget-pin — all three phases
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgetPinRequest {
    #[validate(length(min = 8, max = 16))]
    pub phone_number: String,
    /// Present in phase 2 (OTP check)
    pub code: Option<String>,
    /// Present in phase 3 (overwrite)
    pub new_pin: Option<String>,
    /// Intermediate token from phase 2, required alongside `new_pin`
    pub otp_token: Option<String>,
}

/// POST /login — OTP-only variant; absent `code` requests a dispatch
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 8, max = 16))]
    pub phone_number: String,
    pub code: Option<String>,
}

/// Phase-1 acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSentResponse {
    pub message: String,
}

/// Phase-2 acknowledgement carrying the intermediate token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifiedResponse {
    pub message: String,
    pub otp_token: String,
}

/// Successful authentication payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub phone_number: String,
    pub display_name: Option<String>,
    pub listings: Vec<Listing>,
}

impl AuthResponse {
    /// Builds the response from a domain session
    pub fn from_session(message: &str, session: AuthSession) -> Self {
        Self {
            message: message.to_string(),
            token: session.token,
            phone_number: session.phone_number,
            display_name: session.display_name,
            listings: session.listings,
        }
    }
}

/// Reset completion acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinResetResponse {
    pub message: String,
}
