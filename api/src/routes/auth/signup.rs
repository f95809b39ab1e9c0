//! Handler for POST /signup
//!
//! One endpoint, three phases, selected by which optional fields the client
//! sends:
//! 1. `{phone_number}` — dispatch an OTP (fails `DUPLICATE_USER` first)
//! 2. `{phone_number, code}` — check the OTP, receive the intermediate token
//! 3. `{phone_number, pin, display_name, otp_token}` — create the account

use actix_web::{web, HttpResponse};
use validator::Validate;

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;
use lx_shared::phone::mask_phone_number;
use lx_shared::types::ErrorResponse;

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, OtpSentResponse, OtpVerifiedResponse, SignupRequest};
use crate::handlers::error::{to_http_response, validation_failure_response};

pub async fn signup<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    request: web::Json<SignupRequest>,
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
    log::info!("Processing signup request for {}", mask_phone_number(phone));

    match (&request.code, &request.pin) {
        // Phase 1: dispatch the OTP
        (None, None) => match state.auth_service.signup_start(phone).await {
            Ok(_) => HttpResponse::Ok().json(OtpSentResponse {
                message: "OTP sent successfully. Please check your SMS.".to_string(),
            }),
            Err(error) => to_http_response(&error, state.environment),
        },

        // Phase 2: check the OTP
        (Some(code), None) => match state.auth_service.signup_verify(phone, code).await {
            Ok(otp_token) => HttpResponse::Ok().json(OtpVerifiedResponse {
                message: "OTP verified. Please provide your 4-digit pin.".to_string(),
                otp_token,
            }),
            Err(error) => to_http_response(&error, state.environment),
        },

        // Phase 3: create the account
        (_, Some(pin)) => {
            let (Some(display_name), Some(otp_token)) =
                (&request.display_name, &request.otp_token)
            else {
                return HttpResponse::BadRequest().json(ErrorResponse::new(
                    "VALIDATION_ERROR",
                    "display_name and otp_token are required with pin",
                ));
            };

            match state
                .auth_service
                .signup_complete(phone, pin, display_name, otp_token)
                .await
            {
                Ok(session) => HttpResponse::Ok()
                    .json(AuthResponse::from_session("Signup successful!", session)),
                Err(error) => to_http_response(&error, state.environment),
            }
        }
    }
}
