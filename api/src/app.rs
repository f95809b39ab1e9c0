//! Application state and route registration.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use lx_core::repositories::{ListingRepository, UserRepository};
use lx_core::services::auth::{AuthService, RateLimiterTrait};
use lx_core::services::listing::ListingService;
use lx_core::services::otp::OtpGateway;
use lx_core::services::token::TokenService;
use lx_shared::config::Environment;

use crate::middleware::JwtAuth;
use crate::routes;

/// Shared services handed to every handler
pub struct AppState<U, L, G, R>
where
    U: UserRepository,
    L: ListingRepository,
    G: OtpGateway,
    R: RateLimiterTrait,
{
    pub auth_service: Arc<AuthService<U, L, G, R>>,
    pub listing_service: Arc<ListingService<U, L, R>>,
    pub environment: Environment,
}

/// Register every route of the REST surface
///
/// Bearer-protected resources are wrapped individually in the JWT
/// middleware; everything else is public.
pub fn configure_routes<U, L, G, R>(
    cfg: &mut web::ServiceConfig,
    token_service: Arc<TokenService>,
)
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    G: OtpGateway + 'static,
    R: RateLimiterTrait + 'static,
{
    cfg
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // Authentication flows
        .route("/signup", web::post().to(routes::auth::signup::signup::<U, L, G, R>))
        .route("/signin", web::post().to(routes::auth::signin::signin::<U, L, G, R>))
        .route(
            "/forget-pin",
            web::post().to(routes::auth::forget_pin::forget_pin::<U, L, G, R>),
        )
        .route("/login", web::post().to(routes::auth::login::login::<U, L, G, R>))
        // Public listing read
        .route(
            "/fetch-properties/{id}",
            web::get().to(routes::listing::fetch::fetch_listing::<U, L, G, R>),
        )
        // Bearer-protected listing operations
        .service(
            web::resource("/create-property")
                .wrap(JwtAuth::new(token_service.clone()))
                .route(web::post().to(routes::listing::create::create_listing::<U, L, G, R>)),
        )
        .service(
            web::resource("/user-properties")
                .wrap(JwtAuth::new(token_service.clone()))
                .route(web::get().to(routes::listing::user_listings::user_listings::<U, L, G, R>)),
        )
        .service(
            web::resource("/update-property")
                .wrap(JwtAuth::new(token_service))
                .route(web::put().to(routes::listing::update_access::update_access::<U, L, G, R>)),
        );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "landx-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
