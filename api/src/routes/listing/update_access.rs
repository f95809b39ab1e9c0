//! Handler for PUT /update-property (bearer required)
//!
//! Only the listing's owner may toggle visibility or change the access
//! code; any other authenticated caller gets 403.

use actix_web::{web, HttpResponse};

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;

use crate::app::AppState;
use crate::dto::listing::UpdateAccessRequest;
use crate::handlers::error::to_http_response;
use crate::middleware::AuthContext;

pub async fn update_access<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    auth: AuthContext,
    request: web::Json<UpdateAccessRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    G: OtpGateway + 'static,
    R: RateLimiterTrait + 'static,
{
    match state
        .listing_service
        .set_access(
            &auth.phone_number,
            request.id,
            request.secure,
            request.access_code.as_deref(),
        )
        .await
    {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(error) => to_http_response(&error, state.environment),
    }
}
