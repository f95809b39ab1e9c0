//! Result types for the OTP gateway

use serde::{Deserialize, Serialize};

/// Outcome of an OTP dispatch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpResult {
    /// Gateway-assigned identifier for the dispatched verification
    pub message_id: String,
}

/// Outcome of an OTP check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheckStatus {
    /// The code matched and was within its validity window
    Approved,
    /// The code was wrong, already used, or expired
    Denied,
}

impl OtpCheckStatus {
    /// Whether the check approved the code
    pub fn is_approved(&self) -> bool {
        matches!(self, OtpCheckStatus::Approved)
    }
}
