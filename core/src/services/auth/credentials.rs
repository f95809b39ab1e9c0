//! PIN and access-code validation and hashing
//!
//! Both credentials are 4-digit numeric strings and both are stored as
//! bcrypt hashes; `bcrypt::verify` provides the constant-effort comparison.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::DomainError;

/// Exactly four ASCII digits
static FOUR_DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// OTP codes as dispatched by the verification gateway (4-8 digits)
static OTP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4,8}$").unwrap());

/// Check that a PIN is exactly 4 numeric digits
pub fn is_valid_pin(pin: &str) -> bool {
    FOUR_DIGIT_REGEX.is_match(pin)
}

/// Check that a listing access code is exactly 4 numeric digits
pub fn is_valid_access_code(code: &str) -> bool {
    FOUR_DIGIT_REGEX.is_match(code)
}

/// Check that an OTP code has a plausible shape before asking the gateway
pub fn is_valid_otp(code: &str) -> bool {
    OTP_REGEX.is_match(code)
}

/// Hash a PIN or access code with a per-value salt
pub fn hash_secret(secret: &str) -> Result<String, DomainError> {
    bcrypt::hash(secret, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash credential: {}", e),
    })
}

/// Verify a PIN or access code against a stored hash
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, DomainError> {
    bcrypt::verify(secret, hash).map_err(|e| DomainError::Internal {
        message: format!("Failed to verify credential: {}", e),
    })
}
