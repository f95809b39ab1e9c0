//! Handler for POST /login (OTP-only variant)
//!
//! Without a code the OTP is dispatched; with a code the account is fetched
//! or lazily created. Accounts born here have no PIN until one is set
//! through the reset flow.

use actix_web::{web, HttpResponse};
use validator::Validate;

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;
use lx_shared::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, LoginRequest, OtpSentResponse};
use crate::handlers::error::{to_http_response, validation_failure_response};

pub async fn login<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    request: web::Json<LoginRequest>,
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
    log::info!("Processing login request for {}", mask_phone_number(phone));

    match &request.code {
        None => match state.auth_service.login_request_code(phone).await {
            Ok(_) => HttpResponse::Ok().json(OtpSentResponse {
                message: "OTP sent successfully. Please check your SMS.".to_string(),
            }),
            Err(error) => to_http_response(&error, state.environment),
        },
        Some(code) => match state.auth_service.login_with_code(phone, code).await {
            Ok(session) => {
                HttpResponse::Ok().json(AuthResponse::from_session("Login successful!", session))
            }
            Err(error) => to_http_response(&error, state.environment),
        },
    }
}
