//! Main authentication service implementation
//!
//! Signup and PIN reset are three-phase negotiations. No server-side session
//! state is kept between phases: phase 2 hands the client a short-lived
//! `otp`-scoped token, and phase 3 requires that token back and verifies it
//! against the submitted phone number before touching the store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthSession;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{ListingRepository, UserRepository};
use crate::services::otp::{OtpGateway, SendOtpResult};
use crate::services::token::TokenService;

use lx_shared::phone::{is_valid_phone, mask_phone_number};

use super::credentials::{hash_secret, is_valid_otp, is_valid_pin, verify_secret};
use super::rate_limiter::RateLimiterTrait;

/// Authentication service orchestrating signup, sign-in, PIN reset, and the
/// OTP-only login variant
pub struct AuthService<U, L, G, R>
where
    U: UserRepository,
    L: ListingRepository,
    G: OtpGateway,
    R: RateLimiterTrait,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Listing repository, consulted when a login returns the user's listings
    listing_repository: Arc<L>,
    /// External OTP verification gateway
    otp_gateway: Arc<G>,
    /// Rate limiter for OTP dispatches
    rate_limiter: Arc<R>,
    /// Token service for bearer token management
    token_service: Arc<TokenService>,
}

impl<U, L, G, R> AuthService<U, L, G, R>
where
    U: UserRepository,
    L: ListingRepository,
    G: OtpGateway,
    R: RateLimiterTrait,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        listing_repository: Arc<L>,
        otp_gateway: Arc<G>,
        rate_limiter: Arc<R>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            listing_repository,
            otp_gateway,
            rate_limiter,
            token_service,
        }
    }

    /// Signup phase 1: request an OTP for a new phone number
    ///
    /// Fails with `DuplicateUser` if the phone number is already registered,
    /// so a client can route the user to sign-in instead.
    pub async fn signup_start(&self, phone: &str) -> DomainResult<SendOtpResult> {
        // Step 1: Validate phone number format
        Self::ensure_valid_phone(phone)?;

        // Step 2: Reject phone numbers that already have an account
        if self
            .user_repository
            .exists_by_phone(phone)
            .await?
        {
            return Err(DomainError::Auth(AuthError::DuplicateUser));
        }

        // Step 3: Dispatch the OTP (rate limited per phone)
        self.dispatch_otp(phone).await
    }

    /// Signup phase 2: check the submitted OTP code
    ///
    /// On approval, returns the short-lived intermediate token phase 3
    /// requires.
    pub async fn signup_verify(&self, phone: &str, code: &str) -> DomainResult<String> {
        Self::ensure_valid_phone(phone)?;

        self.check_otp(phone, code).await?;

        self.token_service.issue_otp_token(phone)
    }

    /// Signup phase 3: create the account
    ///
    /// The intermediate token from phase 2 is a mandatory precondition; it
    /// is verified for scope and phone match before anything is persisted.
    pub async fn signup_complete(
        &self,
        phone: &str,
        pin: &str,
        display_name: &str,
        otp_token: &str,
    ) -> DomainResult<AuthSession> {
        // Step 1: Validate inputs
        Self::ensure_valid_phone(phone)?;

        self.token_service.verify_otp_token(otp_token, phone)?;

        if !is_valid_pin(pin) {
            return Err(DomainError::Auth(AuthError::InvalidPinFormat));
        }
        if display_name.trim().is_empty() {
            return Err(DomainError::ValidationErr(ValidationError::RequiredField {
                field: "display_name".to_string(),
            }));
        }

        // Step 2: Re-check for a user created since phase 1; the repository's
        // uniqueness constraint backstops the remaining race window
        if self.user_repository.exists_by_phone(phone).await? {
            return Err(DomainError::Auth(AuthError::DuplicateUser));
        }

        // Step 3: Hash the PIN and persist the user
        let pin_hash = hash_secret(pin)?;
        let user = self
            .user_repository
            .create(User::with_credentials(
                phone.to_string(),
                display_name.trim().to_string(),
                pin_hash,
            ))
            .await?;

        info!(phone = %mask_phone_number(phone), "User registered");

        // Step 4: Issue the session token
        let token = self.token_service.issue_session_token(&user.phone_number)?;

        Ok(AuthSession::new(token, &user, Vec::new()))
    }

    /// Single-step PIN sign-in
    ///
    /// Returns the session token together with the user's listings.
    pub async fn sign_in(&self, phone: &str, pin: &str) -> DomainResult<AuthSession> {
        // Step 1: Validate phone and look up the account
        Self::ensure_valid_phone(phone)?;

        let mut user = self
            .user_repository
            .find_by_phone(phone)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        // Step 2: Validate PIN format before comparing
        if !is_valid_pin(pin) {
            return Err(DomainError::Auth(AuthError::InvalidPinFormat));
        }

        // Step 3: Compare against the stored hash. Accounts created through
        // OTP-only login have no PIN yet; that is surfaced distinctly.
        let pin_hash = user
            .pin_hash
            .clone()
            .ok_or(DomainError::Auth(AuthError::PinNotSet))?;

        if !verify_secret(pin, &pin_hash)? {
            warn!(phone = %mask_phone_number(phone), "Sign-in with incorrect pin");
            return Err(DomainError::Auth(AuthError::IncorrectPin));
        }

        // Step 4: Record the login and build the session
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        self.build_session(&user).await
    }

    /// PIN reset phase 1: request an OTP for an existing account
    pub async fn reset_start(&self, phone: &str) -> DomainResult<SendOtpResult> {
        Self::ensure_valid_phone(phone)?;

        if !self.user_repository.exists_by_phone(phone).await? {
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        self.dispatch_otp(phone).await
    }

    /// PIN reset phase 2: check the OTP and hand back the intermediate token
    pub async fn reset_verify(&self, phone: &str, code: &str) -> DomainResult<String> {
        Self::ensure_valid_phone(phone)?;

        self.check_otp(phone, code).await?;

        self.token_service.issue_otp_token(phone)
    }

    /// PIN reset phase 3: overwrite the PIN hash
    ///
    /// The intermediate token is required and verified; a request without a
    /// matching token never reaches the store.
    pub async fn reset_complete(
        &self,
        phone: &str,
        new_pin: &str,
        otp_token: &str,
    ) -> DomainResult<()> {
        Self::ensure_valid_phone(phone)?;

        self.token_service.verify_otp_token(otp_token, phone)?;

        if !is_valid_pin(new_pin) {
            return Err(DomainError::Auth(AuthError::InvalidPinFormat));
        }

        let user = self
            .user_repository
            .find_by_phone(phone)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let pin_hash = hash_secret(new_pin)?;
        self.user_repository.set_pin_hash(user.id, &pin_hash).await?;

        info!(phone = %mask_phone_number(phone), "Pin reset completed");

        Ok(())
    }

    /// OTP-only login, request phase: dispatch a code
    ///
    /// No existence precondition: a first-time phone number becomes an
    /// account when the code is verified.
    pub async fn login_request_code(&self, phone: &str) -> DomainResult<SendOtpResult> {
        Self::ensure_valid_phone(phone)?;

        self.dispatch_otp(phone).await
    }

    /// OTP-only login, verify phase: check the code and find or create the
    /// account
    ///
    /// Users created here have no PIN and no display name until they set one
    /// through the reset flow.
    pub async fn login_with_code(&self, phone: &str, code: &str) -> DomainResult<AuthSession> {
        Self::ensure_valid_phone(phone)?;

        self.check_otp(phone, code).await?;

        // Find-or-create: a concurrent first login can win the insert; the
        // uniqueness constraint turns the loser into a rejected write that is
        // resolved by re-fetching.
        let mut user = match self.user_repository.find_by_phone(phone).await? {
            Some(existing) => existing,
            None => match self.user_repository.create(User::new(phone.to_string())).await {
                Ok(created) => {
                    info!(phone = %mask_phone_number(phone), "User created via OTP login");
                    created
                }
                Err(DomainError::Auth(AuthError::DuplicateUser)) => self
                    .user_repository
                    .find_by_phone(phone)
                    .await?
                    .ok_or(DomainError::Auth(AuthError::UserNotFound))?,
                Err(e) => return Err(e),
            },
        };

        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        self.build_session(&user).await
    }

    /// Validate an E.164 phone number, masking it in the error
    fn ensure_valid_phone(phone: &str) -> DomainResult<()> {
        if !is_valid_phone(phone) {
            return Err(DomainError::Auth(AuthError::InvalidPhoneFormat {
                phone: mask_phone_number(phone),
            }));
        }
        Ok(())
    }

    /// Rate-limit check, gateway dispatch, counter increment
    async fn dispatch_otp(&self, phone: &str) -> DomainResult<SendOtpResult> {
        let limited = self
            .rate_limiter
            .check_sms_rate_limit(phone)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check rate limit: {}", e),
            })?;

        if limited {
            let reset = self
                .rate_limiter
                .get_sms_rate_limit_reset_time(phone)
                .await
                .unwrap_or(Some(3600))
                .unwrap_or(3600);
            let minutes = (reset / 60).max(1) as u32;

            warn!(phone = %mask_phone_number(phone), "OTP dispatch rate limit exceeded");
            return Err(DomainError::Auth(AuthError::RateLimitExceeded { minutes }));
        }

        let result = self.otp_gateway.send_code(phone).await?;

        let _ = self.rate_limiter.increment_sms_counter(phone).await;

        info!(
            phone = %mask_phone_number(phone),
            message_id = %result.message_id,
            "OTP dispatched"
        );

        Ok(result)
    }

    /// Shape-check the code, then delegate to the gateway
    async fn check_otp(&self, phone: &str, code: &str) -> DomainResult<()> {
        if !is_valid_otp(code) {
            return Err(DomainError::Auth(AuthError::InvalidOtpFormat));
        }

        let status = self.otp_gateway.check_code(phone, code).await?;

        if !status.is_approved() {
            warn!(phone = %mask_phone_number(phone), "OTP check denied");
            return Err(DomainError::Auth(AuthError::InvalidOtp));
        }

        Ok(())
    }

    /// Issue a session token and collect the user's listings
    async fn build_session(&self, user: &User) -> DomainResult<AuthSession> {
        let token = self.token_service.issue_session_token(&user.phone_number)?;
        let listings = self.listing_repository.find_by_owner(user.id).await?;

        Ok(AuthSession::new(token, user, listings))
    }
}
