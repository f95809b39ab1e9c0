//! Trait for the external OTP verification gateway

use async_trait::async_trait;

use crate::errors::DomainError;
use super::types::{OtpCheckStatus, SendOtpResult};

/// External one-time-passcode send/check capability
#[async_trait]
pub trait OtpGateway: Send + Sync {
    /// Ask the gateway to dispatch an OTP to the phone number via SMS
    async fn send_code(&self, phone_number: &str) -> Result<SendOtpResult, DomainError>;

    /// Check a code the client submitted against the gateway
    ///
    /// A definite wrong-or-expired code is `Ok(OtpCheckStatus::Denied)`;
    /// `Err` is reserved for the gateway itself failing.
    async fn check_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<OtpCheckStatus, DomainError>;
}
