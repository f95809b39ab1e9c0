//! Handler for POST /create-property (bearer required)

use actix_web::{web, HttpResponse};
use validator::Validate;

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;

use crate::app::AppState;
use crate::dto::listing::CreateListingRequest;
use crate::handlers::error::{to_http_response, validation_failure_response};
use crate::middleware::AuthContext;

pub async fn create_listing<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    auth: AuthContext,
    request: web::Json<CreateListingRequest>,
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

    match state
        .listing_service
        .create_listing(&auth.phone_number, &request.title, request.details.clone())
        .await
    {
        Ok(listing) => HttpResponse::Created().json(listing),
        Err(error) => to_http_response(&error, state.environment),
    }
}
