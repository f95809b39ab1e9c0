//! Handler for GET /fetch-properties/{id}
//!
//! Public listings are returned to anyone; private listings require the
//! matching access code via the `pin` query parameter. No bearer token is
//! involved in reads.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::RateLimiterTrait;
use lx_core::services::otp::OtpGateway;

use crate::app::AppState;
use crate::dto::listing::AccessCodeQuery;
use crate::handlers::error::to_http_response;

pub async fn fetch_listing<U, L, G, R>(
    state: web::Data<AppState<U, L, G, R>>,
    path: web::Path<Uuid>,
    query: web::Query<AccessCodeQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    G: OtpGateway + 'static,
    R: RateLimiterTrait + 'static,
{
    let id = path.into_inner();

    match state
        .listing_service
        .fetch_listing(id, query.pin.as_deref())
        .await
    {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(error) => to_http_response(&error, state.environment),
    }
}
