//! Handler for POST /signin

use actix_web::{web, HttpResponse};
use validator::Validate;

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;
use lx_shared::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, SigninRequest};
use crate::handlers::error::{to_http_response, validation_failure_response};

pub async fn signin<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    request: web::Json<SigninRequest>,
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
    log::info!("Processing signin request for {}", mask_phone_number(phone));

    match state.auth_service.sign_in(phone, &request.pin).await {
        Ok(session) => {
            HttpResponse::Ok().json(AuthResponse::from_session("Login successful!", session))
        }
        Err(error) => to_http_response(&error, state.environment),
    }
}
