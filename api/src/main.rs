use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::{info, warn};

use lx_api::app::{configure_routes, AppState};
use lx_api::config::Config;
use lx_api::middleware::cors::create_cors;

use lx_core::services::auth::AuthService;
use lx_core::services::listing::ListingService;
use lx_core::services::token::{TokenService, TokenServiceConfig};

use lx_infra::database::{create_pool, MySqlListingRepository, MySqlUserRepository};
use lx_infra::otp::TwilioVerifyGateway;
use lx_infra::services::RedisRateLimiter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting LandX API server");

    // Load configuration
    let config = Config::from_env();
    if config.auth.is_using_default_secret() {
        if config.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        warn!("Using the default JWT secret; set JWT_SECRET before deploying");
    }

    // Database pool and repositories
    let pool = create_pool(&config.database)
        .await
        .context("Failed to set up the database pool")?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let listing_repository = Arc::new(MySqlListingRepository::new(pool));

    // External collaborators
    let otp_gateway =
        Arc::new(TwilioVerifyGateway::from_env().context("Failed to set up the OTP gateway")?);
    let rate_limiter =
        Arc::new(RedisRateLimiter::new(&config.cache).context("Failed to set up Redis")?);

    // Domain services
    let token_service = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: config.auth.jwt_secret.clone(),
        session_token_expiry_days: config.auth.session_token_expiry_days,
        otp_token_expiry_minutes: config.auth.otp_token_expiry_minutes,
    }));
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        listing_repository.clone(),
        otp_gateway,
        rate_limiter.clone(),
        token_service.clone(),
    ));
    let listing_service = Arc::new(ListingService::new(
        user_repository,
        listing_repository,
        rate_limiter,
    ));

    let state = web::Data::new(AppState {
        auth_service,
        listing_service,
        environment: config.environment,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(state.clone())
            .configure(|cfg| {
                configure_routes::<
                    MySqlUserRepository,
                    MySqlListingRepository,
                    TwilioVerifyGateway,
                    RedisRateLimiter,
                >(cfg, token_service.clone())
            })
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await?;
    Ok(())
}
