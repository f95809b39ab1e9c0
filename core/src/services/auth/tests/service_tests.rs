//! Authentication service tests

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::listing::Listing;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::listing::MockListingRepository;
use crate::repositories::user::MockUserRepository;
use crate::repositories::{ListingRepository, UserRepository};
use crate::services::auth::{AuthService, InMemoryRateLimiter};
use crate::services::otp::mock::MockOtpGateway;
use crate::services::token::{TokenService, TokenServiceConfig};

const PHONE: &str = "+911234567890";
const OTHER_PHONE: &str = "+919999999999";
const GOOD_CODE: &str = "123456";

struct TestContext {
    auth: AuthService<MockUserRepository, MockListingRepository, MockOtpGateway, InMemoryRateLimiter>,
    users: Arc<MockUserRepository>,
    listings: Arc<MockListingRepository>,
    gateway: Arc<MockOtpGateway>,
    tokens: Arc<TokenService>,
}

fn setup() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let listings = Arc::new(MockListingRepository::new());
    let gateway = Arc::new(MockOtpGateway::new());
    let limiter = Arc::new(InMemoryRateLimiter::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("test-secret")));

    let auth = AuthService::new(
        users.clone(),
        listings.clone(),
        gateway.clone(),
        limiter,
        tokens.clone(),
    );

    TestContext {
        auth,
        users,
        listings,
        gateway,
        tokens,
    }
}

/// Runs the full three-phase signup and returns the resulting session
async fn register(ctx: &TestContext, phone: &str, pin: &str, name: &str) -> crate::domain::value_objects::AuthSession {
    ctx.auth.signup_start(phone).await.unwrap();
    let otp_token = ctx.auth.signup_verify(phone, GOOD_CODE).await.unwrap();
    ctx.auth
        .signup_complete(phone, pin, name, &otp_token)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_signup_full_flow() {
    let ctx = setup();

    let session = register(&ctx, PHONE, "1234", "Asha").await;

    assert_eq!(session.phone_number, PHONE);
    assert_eq!(session.display_name.as_deref(), Some("Asha"));
    assert!(session.listings.is_empty());

    // The session token is immediately usable
    let claims = ctx.tokens.verify_session_token(&session.token).unwrap();
    assert_eq!(claims.phone_number(), PHONE);

    // The stored pin is hashed, not plaintext
    let user = ctx.users.find_by_phone(PHONE).await.unwrap().unwrap();
    let hash = user.pin_hash.unwrap();
    assert_ne!(hash, "1234");
    assert!(hash.starts_with("$2"));
}

#[tokio::test]
async fn test_signup_start_rejects_existing_phone() {
    let ctx = setup();
    register(&ctx, PHONE, "1234", "Asha").await;

    let result = ctx.auth.signup_start(PHONE).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateUser))
    ));
}

#[tokio::test]
async fn test_signup_start_dispatches_otp() {
    let ctx = setup();

    ctx.auth.signup_start(PHONE).await.unwrap();

    assert_eq!(ctx.gateway.dispatched_to().await, vec![PHONE.to_string()]);
}

#[tokio::test]
async fn test_signup_verify_rejects_wrong_code() {
    let ctx = setup();
    ctx.auth.signup_start(PHONE).await.unwrap();

    let result = ctx.auth.signup_verify(PHONE, "000000").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidOtp))));
}

#[tokio::test]
async fn test_signup_complete_requires_otp_token() {
    let ctx = setup();
    ctx.auth.signup_start(PHONE).await.unwrap();

    // Garbage token
    let result = ctx
        .auth
        .signup_complete(PHONE, "1234", "Asha", "not-a-token")
        .await;
    assert!(matches!(result, Err(DomainError::Token(_))));

    // Session-scoped token is not proof of a fresh OTP check
    let session_token = ctx.tokens.issue_session_token(PHONE).unwrap();
    let result = ctx
        .auth
        .signup_complete(PHONE, "1234", "Asha", &session_token)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidScope))
    ));

    // Token for a different phone number
    let other_token = ctx.tokens.issue_otp_token(OTHER_PHONE).unwrap();
    let result = ctx
        .auth
        .signup_complete(PHONE, "1234", "Asha", &other_token)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidClaims))
    ));

    // Nothing was persisted by any of the rejected attempts
    assert!(!ctx.users.exists_by_phone(PHONE).await.unwrap());
}

#[tokio::test]
async fn test_signup_complete_validates_pin_and_name() {
    let ctx = setup();
    ctx.auth.signup_start(PHONE).await.unwrap();
    let otp_token = ctx.auth.signup_verify(PHONE, GOOD_CODE).await.unwrap();

    let result = ctx
        .auth
        .signup_complete(PHONE, "12345", "Asha", &otp_token)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidPinFormat))
    ));

    let result = ctx.auth.signup_complete(PHONE, "1234", "  ", &otp_token).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_signup_complete_detects_race_duplicate() {
    let ctx = setup();
    ctx.auth.signup_start(PHONE).await.unwrap();
    let otp_token = ctx.auth.signup_verify(PHONE, GOOD_CODE).await.unwrap();

    // Another registration completes between phase 2 and phase 3
    register(&ctx, PHONE, "5678", "Ravi").await;

    let result = ctx
        .auth
        .signup_complete(PHONE, "1234", "Asha", &otp_token)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateUser))
    ));
}

#[tokio::test]
async fn test_sign_in_success_returns_own_listings_only() {
    let ctx = setup();
    register(&ctx, PHONE, "1234", "Asha").await;
    register(&ctx, OTHER_PHONE, "5678", "Ravi").await;

    let asha = ctx.users.find_by_phone(PHONE).await.unwrap().unwrap();
    let ravi = ctx.users.find_by_phone(OTHER_PHONE).await.unwrap().unwrap();
    ctx.listings
        .create(Listing::new(asha.id, "Plot A".to_string(), json!({})))
        .await
        .unwrap();
    ctx.listings
        .create(Listing::new(ravi.id, "Plot B".to_string(), json!({})))
        .await
        .unwrap();

    let session = ctx.auth.sign_in(PHONE, "1234").await.unwrap();

    assert_eq!(session.listings.len(), 1);
    assert_eq!(session.listings[0].title, "Plot A");

    let user = ctx.users.find_by_phone(PHONE).await.unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn test_sign_in_unknown_phone() {
    let ctx = setup();

    let result = ctx.auth.sign_in(PHONE, "1234").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_sign_in_wrong_pin() {
    let ctx = setup();
    register(&ctx, PHONE, "1234", "Asha").await;

    let result = ctx.auth.sign_in(PHONE, "9999").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::IncorrectPin))
    ));
}

#[tokio::test]
async fn test_sign_in_bad_pin_format() {
    let ctx = setup();
    register(&ctx, PHONE, "1234", "Asha").await;

    let result = ctx.auth.sign_in(PHONE, "12ab").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidPinFormat))
    ));
}

#[tokio::test]
async fn test_reset_start_requires_existing_user() {
    let ctx = setup();

    let result = ctx.auth.reset_start(PHONE).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_reset_full_flow_changes_pin() {
    let ctx = setup();
    register(&ctx, PHONE, "1234", "Asha").await;

    ctx.auth.reset_start(PHONE).await.unwrap();
    let otp_token = ctx.auth.reset_verify(PHONE, GOOD_CODE).await.unwrap();
    ctx.auth
        .reset_complete(PHONE, "4321", &otp_token)
        .await
        .unwrap();

    assert!(matches!(
        ctx.auth.sign_in(PHONE, "1234").await,
        Err(DomainError::Auth(AuthError::IncorrectPin))
    ));
    assert!(ctx.auth.sign_in(PHONE, "4321").await.is_ok());
}

#[tokio::test]
async fn test_reset_complete_requires_otp_token() {
    let ctx = setup();
    register(&ctx, PHONE, "1234", "Asha").await;

    let session_token = ctx.tokens.issue_session_token(PHONE).unwrap();
    let result = ctx
        .auth
        .reset_complete(PHONE, "4321", &session_token)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidScope))
    ));

    // The pin is unchanged
    assert!(ctx.auth.sign_in(PHONE, "1234").await.is_ok());
}

#[tokio::test]
async fn test_otp_login_creates_user_without_pin() {
    let ctx = setup();

    ctx.auth.login_request_code(PHONE).await.unwrap();
    let session = ctx.auth.login_with_code(PHONE, GOOD_CODE).await.unwrap();

    assert_eq!(session.phone_number, PHONE);
    assert_eq!(session.display_name, None);

    let user = ctx.users.find_by_phone(PHONE).await.unwrap().unwrap();
    assert!(!user.has_pin());
}

#[tokio::test]
async fn test_otp_login_is_idempotent_per_phone() {
    let ctx = setup();

    ctx.auth.login_with_code(PHONE, GOOD_CODE).await.unwrap();
    let first = ctx.users.find_by_phone(PHONE).await.unwrap().unwrap();

    ctx.auth.login_with_code(PHONE, GOOD_CODE).await.unwrap();
    let second = ctx.users.find_by_phone(PHONE).await.unwrap().unwrap();

    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_otp_created_user_cannot_pin_sign_in_until_reset() {
    let ctx = setup();

    // Account born through OTP login has no pin
    ctx.auth.login_with_code(PHONE, GOOD_CODE).await.unwrap();
    let result = ctx.auth.sign_in(PHONE, "1234").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::PinNotSet))));

    // Setting a pin through the reset flow unlocks pin sign-in
    ctx.auth.reset_start(PHONE).await.unwrap();
    let otp_token = ctx.auth.reset_verify(PHONE, GOOD_CODE).await.unwrap();
    ctx.auth
        .reset_complete(PHONE, "1234", &otp_token)
        .await
        .unwrap();

    assert!(ctx.auth.sign_in(PHONE, "1234").await.is_ok());
}

#[tokio::test]
async fn test_otp_dispatch_rate_limited() {
    let ctx = setup();

    for _ in 0..3 {
        ctx.auth.login_request_code(PHONE).await.unwrap();
    }

    let result = ctx.auth.login_request_code(PHONE).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::RateLimitExceeded { .. }))
    ));

    // A different phone number is unaffected
    assert!(ctx.auth.login_request_code(OTHER_PHONE).await.is_ok());
}

#[tokio::test]
async fn test_invalid_phone_rejected_everywhere() {
    let ctx = setup();

    let result = ctx.auth.signup_start("12345").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidPhoneFormat { .. }))
    ));

    let result = ctx.auth.sign_in("not-a-phone", "1234").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidPhoneFormat { .. }))
    ));
}

#[tokio::test]
async fn test_gateway_failure_surfaces() {
    let ctx = setup();
    ctx.gateway.set_down(true);

    let result = ctx.auth.login_request_code(PHONE).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::OtpGatewayFailure))
    ));
}
