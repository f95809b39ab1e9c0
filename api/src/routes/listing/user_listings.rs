//! Handler for GET /user-properties (bearer required)

use actix_web::{web, HttpResponse};

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;

use crate::app::AppState;
use crate::dto::listing::UserListingsResponse;
use crate::handlers::error::to_http_response;
use crate::middleware::AuthContext;

pub async fn user_listings<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    G: OtpGateway + 'static,
    R: RateLimiterTrait + 'static,
{
    match state.listing_service.user_listings(&auth.phone_number).await {
        Ok(listings) => HttpResponse::Ok().json(UserListingsResponse {
            count: listings.len(),
            listings,
        }),
        Err(error) => to_http_response(&error, state.environment),
    }
}
