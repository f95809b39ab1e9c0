//! Twilio Verify v2 OTP gateway
//!
//! Twilio Verify owns code generation, SMS delivery, storage, and expiry;
//! this client only starts verifications and checks submitted codes.
//! Phone numbers are masked in all log output.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use lx_core::errors::{AuthError, DomainError};
use lx_core::services::otp::{OtpCheckStatus, OtpGateway, SendOtpResult};
use lx_shared::phone::mask_phone_number;

use crate::InfrastructureError;

const TWILIO_VERIFY_BASE_URL: &str = "https://verify.twilio.com/v2/Services";

/// Twilio Verify configuration
#[derive(Debug, Clone)]
pub struct TwilioVerifyConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// Verify Service SID (the `VA...` identifier)
    pub verify_service_sid: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioVerifyConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let verify_service_sid = std::env::var("TWILIO_VERIFY_SERVICE_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_VERIFY_SERVICE_SID not set".to_string()))?;

        if !verify_service_sid.starts_with("VA") {
            return Err(InfrastructureError::Config(
                "TWILIO_VERIFY_SERVICE_SID must be a Verify service SID (starting with 'VA')"
                    .to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            verify_service_sid,
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Body of a Verification / VerificationCheck resource
#[derive(Debug, Deserialize)]
struct VerificationResource {
    sid: String,
    status: String,
}

/// Twilio Verify gateway implementation
pub struct TwilioVerifyGateway {
    client: reqwest::Client,
    config: TwilioVerifyConfig,
}

impl TwilioVerifyGateway {
    /// Create a new Twilio Verify gateway
    pub fn new(config: TwilioVerifyConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!("Twilio Verify gateway initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(TwilioVerifyConfig::from_env()?)
    }

    /// POST a form to a Verify endpoint, retrying once on a 5xx response
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response, DomainError> {
        for attempt in 1..=2 {
            let response = self
                .client
                .post(url)
                .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
                .form(form)
                .send()
                .await
                .map_err(|e| {
                    error!("Twilio request failed: {}", e);
                    DomainError::Auth(AuthError::OtpGatewayFailure)
                })?;

            if response.status().is_server_error() && attempt == 1 {
                warn!(status = %response.status(), "Twilio returned a server error, retrying");
                continue;
            }

            return Ok(response);
        }
        unreachable!("loop always returns on the second attempt")
    }
}

#[async_trait]
impl OtpGateway for TwilioVerifyGateway {
    async fn send_code(&self, phone_number: &str) -> Result<SendOtpResult, DomainError> {
        let url = format!(
            "{}/{}/Verifications",
            TWILIO_VERIFY_BASE_URL, self.config.verify_service_sid
        );

        debug!(phone = %mask_phone_number(phone_number), "Starting verification");

        let response = self
            .post_form(&url, &[("To", phone_number), ("Channel", "sms")])
            .await?;

        if !response.status().is_success() {
            error!(
                status = %response.status(),
                phone = %mask_phone_number(phone_number),
                "Twilio rejected the verification request"
            );
            return Err(DomainError::Auth(AuthError::OtpGatewayFailure));
        }

        let resource: VerificationResource = response.json().await.map_err(|e| {
            error!("Failed to parse Twilio response: {}", e);
            DomainError::Auth(AuthError::OtpGatewayFailure)
        })?;

        info!(
            phone = %mask_phone_number(phone_number),
            sid = %resource.sid,
            "Verification started"
        );

        Ok(SendOtpResult {
            message_id: resource.sid,
        })
    }

    async fn check_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<OtpCheckStatus, DomainError> {
        let url = format!(
            "{}/{}/VerificationCheck",
            TWILIO_VERIFY_BASE_URL, self.config.verify_service_sid
        );

        let response = self
            .post_form(&url, &[("To", phone_number), ("Code", code)])
            .await?;

        // Twilio answers 404 when no verification is pending for the number
        // (expired or already consumed); that is a denial, not an outage.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(
                phone = %mask_phone_number(phone_number),
                "No pending verification for this number"
            );
            return Ok(OtpCheckStatus::Denied);
        }

        if !response.status().is_success() {
            error!(
                status = %response.status(),
                phone = %mask_phone_number(phone_number),
                "Twilio rejected the verification check"
            );
            return Err(DomainError::Auth(AuthError::OtpGatewayFailure));
        }

        let resource: VerificationResource = response.json().await.map_err(|e| {
            error!("Failed to parse Twilio response: {}", e);
            DomainError::Auth(AuthError::OtpGatewayFailure)
        })?;

        if resource.status == "approved" {
            Ok(OtpCheckStatus::Approved)
        } else {
            debug!(
                phone = %mask_phone_number(phone_number),
                status = %resource.status,
                "Verification check not approved"
            );
            Ok(OtpCheckStatus::Denied)
        }
    }
}
