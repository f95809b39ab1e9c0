//! Error type definitions for authentication, token, and listing operations.
//!
//! HTTP status codes and response bodies are assigned in the presentation
//! layer; these variants carry only what the domain knows.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Pin must be a 4-digit number")]
    InvalidPinFormat,

    #[error("Invalid verification code format")]
    InvalidOtpFormat,

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("Incorrect pin")]
    IncorrectPin,

    #[error("No pin is set for this account")]
    PinNotSet,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists with this phone number")]
    DuplicateUser,

    #[error("Too many requests. Please try again in {minutes} minutes")]
    RateLimitExceeded { minutes: u32 },

    #[error("Verification service failure")]
    OtpGatewayFailure,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token scope not valid for this operation")]
    InvalidScope,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Listing access and mutation errors
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Property not found")]
    NotFound,

    #[error("This property is protected by an access code")]
    AccessCodeRequired,

    #[error("Invalid access code")]
    InvalidAccessCode,

    #[error("Access code must be a 4-digit number")]
    InvalidAccessCodeFormat,

    #[error("Only the property owner may change its access settings")]
    Unauthorized,

    #[error("Too many access code attempts. Please try again in {minutes} minutes")]
    AccessCodeAttemptsExceeded { minutes: u32 },
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_auth_error_messages() {
        let error = AuthError::InvalidPhoneFormat {
            phone: "+911****7890".to_string(),
        };
        assert!(error.to_string().contains("Invalid phone format"));
        assert!(error.to_string().contains("+911****7890"));
    }

    #[test]
    fn test_domain_error_bridges_transparently() {
        let error: DomainError = TokenError::TokenExpired.into();
        assert_eq!(error.to_string(), "Token expired");

        let error: DomainError = ListingError::AccessCodeRequired.into();
        assert!(error.to_string().contains("access code"));
    }

    #[test]
    fn test_rate_limit_error_message() {
        let error = AuthError::RateLimitExceeded { minutes: 5 };
        assert!(error.to_string().contains("5 minutes"));
    }
}
