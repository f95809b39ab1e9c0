//! Authentication flows: signup, sign-in, PIN reset, OTP-only login.

mod credentials;
mod rate_limiter;
mod service;

#[cfg(test)]
mod tests;

pub use credentials::{hash_secret, is_valid_access_code, is_valid_otp, is_valid_pin, verify_secret};
pub use rate_limiter::{InMemoryRateLimiter, RateLimiterTrait};
pub use service::AuthService;
