//! Handler for POST /forget-pin
//!
//! Phased like signup: phone only → OTP dispatch; phone + code → OTP check
//! returning the intermediate token; phone + new_pin + otp_token → the PIN
//! is overwritten. Phase 3 without a valid token is rejected outright.

use actix_web::{web, HttpResponse};
use validator::Validate;

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;
use lx_shared::phone::mask_phone_number;
use lx_shared::types::ErrorResponse;

use crate::app::AppState;
use crate::dto::auth::{ForgetPinRequest, OtpSentResponse, OtpVerifiedResponse, PinResetResponse};
use crate::handlers::error::{to_http_response, validation_failure_response};

pub async fn forget_pin<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    request: web::Json<ForgetPinRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    G: OtpGateway + 'static,
    R: RateLimiterTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_failure_response(&errors);
    }

    let phone = request.phone_number.as_str();
    log::info!(
        "Processing forget-pin request for {}",
        mask_phone_number(phone)
    );

    match (&request.code, &request.new_pin) {
        // Phase 1: dispatch the OTP to an existing account
        (None, None) => match state.auth_service.reset_start(phone).await {
            Ok(_) => HttpResponse::Ok().json(OtpSentResponse {
                message: "OTP sent successfully. Please check your SMS.".to_string(),
            }),
            Err(error) => to_http_response(&error, state.environment),
        },

        // Phase 2: check the OTP
        (Some(code), None) => match state.auth_service.reset_verify(phone, code).await {
            Ok(otp_token) => HttpResponse::Ok().json(OtpVerifiedResponse {
                message: "OTP verified. Please provide your new 4-digit pin.".to_string(),
                otp_token,
            }),
            Err(error) => to_http_response(&error, state.environment),
        },

        // Phase 3: overwrite the PIN
        (_, Some(new_pin)) => {
            let Some(otp_token) = &request.otp_token else {
                return HttpResponse::BadRequest().json(ErrorResponse::new(
                    "VALIDATION_ERROR",
                    "otp_token is required with new_pin",
                ));
            };

            match state
                .auth_service
                .reset_complete(phone, new_pin, otp_token)
                .await
            {
                Ok(()) => HttpResponse::Ok().json(PinResetResponse {
                    message: "Pin reset successful!".to_string(),
                }),
                Err(error) => to_http_response(&error, state.environment),
            }
        }
    }
}
