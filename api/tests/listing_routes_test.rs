//! Route-level tests for the listing endpoints

use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;
use std::sync::Arc;

use lx_api::app::{configure_routes, AppState};
use lx_core::domain::entities::user::User;
use lx_core::repositories::listing::MockListingRepository;
use lx_core::repositories::user::MockUserRepository;
use lx_core::repositories::UserRepository;
use lx_core::services::auth::{hash_secret, AuthService, InMemoryRateLimiter};
use lx_core::services::listing::ListingService;
use lx_core::services::otp::mock::MockOtpGateway;
use lx_core::services::token::{TokenService, TokenServiceConfig};
use lx_shared::config::Environment;

const OWNER_PHONE: &str = "+911234567890";
const OTHER_PHONE: &str = "+919999999999";

type TestState =
    AppState<MockUserRepository, MockListingRepository, MockOtpGateway, InMemoryRateLimiter>;

struct TestHarness {
    state: web::Data<TestState>,
    tokens: Arc<TokenService>,
    users: Arc<MockUserRepository>,
}

async fn harness() -> TestHarness {
    let users = Arc::new(MockUserRepository::new());
    let listings = Arc::new(MockListingRepository::new());
    let gateway = Arc::new(MockOtpGateway::new());
    let limiter = Arc::new(InMemoryRateLimiter::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("test-secret")));

    for (phone, name) in [(OWNER_PHONE, "Asha"), (OTHER_PHONE, "Ravi")] {
        users
            .create(User::with_credentials(
                phone.to_string(),
                name.to_string(),
                hash_secret("1234").unwrap(),
            ))
            .await
            .unwrap();
    }

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        listings.clone(),
        gateway,
        limiter.clone(),
        tokens.clone(),
    ));
    let listing_service = Arc::new(ListingService::new(users.clone(), listings, limiter));

    TestHarness {
        state: web::Data::new(AppState {
            auth_service,
            listing_service,
            environment: Environment::Development,
        }),
        tokens,
        users,
    }
}

macro_rules! test_app {
    ($harness:expr) => {{
        let tokens = $harness.tokens.clone();
        test::init_service(
            App::new()
                .app_data($harness.state.clone())
                .configure(move |cfg| {
                    configure_routes::<
                        MockUserRepository,
                        MockListingRepository,
                        MockOtpGateway,
                        InMemoryRateLimiter,
                    >(cfg, tokens.clone())
                }),
        )
        .await
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn test_create_listing_requires_bearer() {
    let harness = harness().await;
    let app = test_app!(harness);

    // The JWT middleware signals rejection with `Err(ErrorUnauthorized(..))`,
    // which `test::call_service` would unwrap-panic on; `try_call_service`
    // surfaces it so we can read the 401 status the framework would emit.
    let status = match test::try_call_service(
        &app,
        test::TestRequest::post()
            .uri("/create-property")
            .set_json(json!({"title": "Plot A", "details": {}}))
            .to_request(),
    )
    .await
    {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_otp_scoped_token_rejected_by_middleware() {
    let harness = harness().await;
    let otp_token = harness.tokens.issue_otp_token(OWNER_PHONE).unwrap();
    let app = test_app!(harness);

    let status = match test::try_call_service(
        &app,
        test::TestRequest::post()
            .uri("/create-property")
            .insert_header(bearer(&otp_token))
            .set_json(json!({"title": "Plot A", "details": {}}))
            .to_request(),
    )
    .await
    {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_and_fetch_public_listing() {
    let harness = harness().await;
    let token = harness.tokens.issue_session_token(OWNER_PHONE).unwrap();
    let app = test_app!(harness);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create-property")
            .insert_header(bearer(&token))
            .set_json(json!({
                "title": "Plot A",
                "details": {"price": 250000, "area_sqft": 2400},
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["title"], "Plot A");
    assert_eq!(body["is_private"], false);

    // Public fetch needs no auth and ignores any supplied code
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/fetch-properties/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["price"], 250000);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/fetch-properties/{}?pin=0000", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_fetch_unknown_listing_is_404() {
    let harness = harness().await;
    let app = test_app!(harness);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/fetch-properties/7e5c1c9e-4b8a-4f5e-9d2a-1c3b5a7d9f01")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_private_listing_access_flow() {
    let harness = harness().await;
    let token = harness.tokens.issue_session_token(OWNER_PHONE).unwrap();
    let app = test_app!(harness);

    // Create and protect with code 5566
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create-property")
            .insert_header(bearer(&token))
            .set_json(json!({"title": "Plot A", "details": {}}))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/update-property")
            .insert_header(bearer(&token))
            .set_json(json!({"id": id, "secure": true, "access_code": "5566"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["is_private"], true);

    // No code: 403 with the distinct prompt-for-code error
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/fetch-properties/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ACCESS_CODE_REQUIRED");

    // Wrong code
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/fetch-properties/{}?pin=0000", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_ACCESS_CODE");

    // Correct code
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/fetch-properties/{}?pin=5566", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_access_rejects_non_owner() {
    let harness = harness().await;
    let owner_token = harness.tokens.issue_session_token(OWNER_PHONE).unwrap();
    let other_token = harness.tokens.issue_session_token(OTHER_PHONE).unwrap();
    let app = test_app!(harness);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create-property")
            .insert_header(bearer(&owner_token))
            .set_json(json!({"title": "Plot A", "details": {}}))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/update-property")
            .insert_header(bearer(&other_token))
            .set_json(json!({"id": id, "secure": true, "access_code": "5566"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_OWNER");
}

#[actix_web::test]
async fn test_user_properties_returns_only_own() {
    let harness = harness().await;
    let owner_token = harness.tokens.issue_session_token(OWNER_PHONE).unwrap();
    let other_token = harness.tokens.issue_session_token(OTHER_PHONE).unwrap();
    let app = test_app!(harness);

    for (token, title) in [(&owner_token, "Plot A"), (&other_token, "Plot B")] {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/create-property")
                .insert_header(bearer(token))
                .set_json(json!({"title": title, "details": {}}))
                .to_request(),
        )
        .await;
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/user-properties")
            .insert_header(bearer(&owner_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["listings"][0]["title"], "Plot A");

    // The listing payload never exposes credential hashes
    let user = harness
        .users
        .find_by_phone(OWNER_PHONE)
        .await
        .unwrap()
        .unwrap();
    assert!(user.has_pin());
    assert!(body["listings"][0].get("access_code_hash").is_none());
}
