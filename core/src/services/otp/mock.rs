//! Mock OTP gateway for tests and no-provider development

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::errors::{AuthError, DomainError};

use super::traits::OtpGateway;
use super::types::{OtpCheckStatus, SendOtpResult};

/// Scripted OTP gateway: approves one known code, records dispatches
pub struct MockOtpGateway {
    accepted_code: String,
    gateway_down: AtomicBool,
    dispatch_count: AtomicU64,
    sent_to: Mutex<Vec<String>>,
}

impl MockOtpGateway {
    /// Gateway approving the default test code `123456`
    pub fn new() -> Self {
        Self::with_accepted_code("123456")
    }

    /// Gateway approving only the given code
    pub fn with_accepted_code(code: &str) -> Self {
        Self {
            accepted_code: code.to_string(),
            gateway_down: AtomicBool::new(false),
            dispatch_count: AtomicU64::new(0),
            sent_to: Mutex::new(Vec::new()),
        }
    }

    /// Make subsequent calls fail like an unreachable provider
    pub fn set_down(&self, down: bool) {
        self.gateway_down.store(down, Ordering::SeqCst);
    }

    /// Phone numbers that received a dispatch, in order
    pub async fn dispatched_to(&self) -> Vec<String> {
        self.sent_to.lock().await.clone()
    }
}

impl Default for MockOtpGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpGateway for MockOtpGateway {
    async fn send_code(&self, phone_number: &str) -> Result<SendOtpResult, DomainError> {
        if self.gateway_down.load(Ordering::SeqCst) {
            return Err(DomainError::Auth(AuthError::OtpGatewayFailure));
        }

        self.sent_to.lock().await.push(phone_number.to_string());
        let n = self.dispatch_count.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(SendOtpResult {
            message_id: format!("VE{:08}", n),
        })
    }

    async fn check_code(
        &self,
        _phone_number: &str,
        code: &str,
    ) -> Result<OtpCheckStatus, DomainError> {
        if self.gateway_down.load(Ordering::SeqCst) {
            return Err(DomainError::Auth(AuthError::OtpGatewayFailure));
        }

        if code == self.accepted_code {
            Ok(OtpCheckStatus::Approved)
        } else {
            Ok(OtpCheckStatus::Denied)
        }
    }
}
