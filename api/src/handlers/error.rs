//! Domain error to HTTP response mapping.
//!
//! Credential failures (wrong PIN, wrong OTP, wrong access code, bad token)
//! all surface as generic 401 bodies so the response does not distinguish
//! more than the earlier not-found checks already imply.
//! `AccessCodeRequired` is deliberately distinct from `NotFound` so clients
//! can render a code-entry prompt instead of a dead end.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use lx_core::errors::{AuthError, DomainError, ListingError, TokenError, ValidationError};
use lx_shared::config::Environment;
use lx_shared::types::ErrorResponse;

/// Convert a domain error into an HTTP response
pub fn to_http_response(error: &DomainError, environment: Environment) -> HttpResponse {
    log::debug!("Domain error: {:?}", error);

    match error {
        DomainError::Auth(auth_error) => auth_error_response(auth_error),
        DomainError::Token(token_error) => token_error_response(token_error),
        DomainError::Listing(listing_error) => listing_error_response(listing_error),
        DomainError::ValidationErr(validation_error) => {
            validation_error_response(validation_error)
        }
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_ERROR", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "NOT_FOUND",
            format!("{} not found", resource),
        )),
        DomainError::Internal { message } => internal_error_response(message, environment),
    }
}

/// 500-class response with detail suppressed outside development
pub fn internal_error_response(detail: &str, environment: Environment) -> HttpResponse {
    log::error!("Internal error: {}", detail);

    let message = if environment.is_development() {
        detail.to_string()
    } else {
        "An internal error occurred".to_string()
    };

    HttpResponse::InternalServerError().json(ErrorResponse::new("INTERNAL_ERROR", message))
}

/// 400 response for DTO-level validation failures
pub fn validation_failure_response(errors: &ValidationErrors) -> HttpResponse {
    log::debug!("Request validation failed: {:?}", errors);

    HttpResponse::BadRequest().json(ErrorResponse::new(
        "VALIDATION_ERROR",
        "Invalid request data",
    ))
}

fn auth_error_response(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::InvalidPhoneFormat { .. } => HttpResponse::BadRequest()
            .json(ErrorResponse::new("INVALID_PHONE_FORMAT", error.to_string())),
        AuthError::InvalidPinFormat => HttpResponse::BadRequest()
            .json(ErrorResponse::new("INVALID_PIN_FORMAT", error.to_string())),
        AuthError::InvalidOtpFormat => HttpResponse::BadRequest()
            .json(ErrorResponse::new("INVALID_OTP_FORMAT", error.to_string())),
        AuthError::DuplicateUser => HttpResponse::BadRequest()
            .json(ErrorResponse::new("DUPLICATE_USER", error.to_string())),
        AuthError::UserNotFound => HttpResponse::NotFound()
            .json(ErrorResponse::new("USER_NOT_FOUND", error.to_string())),
        AuthError::InvalidOtp => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("INVALID_OTP", error.to_string())),
        AuthError::IncorrectPin => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("INCORRECT_PIN", error.to_string())),
        AuthError::PinNotSet => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("PIN_NOT_SET", error.to_string())),
        AuthError::RateLimitExceeded { .. } => HttpResponse::TooManyRequests()
            .json(ErrorResponse::new("RATE_LIMIT_EXCEEDED", error.to_string())),
        AuthError::OtpGatewayFailure => HttpResponse::ServiceUnavailable()
            .json(ErrorResponse::new("OTP_GATEWAY_FAILURE", error.to_string())),
    }
}

fn token_error_response(error: &TokenError) -> HttpResponse {
    // Token failures are not differentiated for the caller
    log::debug!("Token error: {:?}", error);
    HttpResponse::Unauthorized().json(ErrorResponse::new("INVALID_TOKEN", "Token is not valid"))
}

fn listing_error_response(error: &ListingError) -> HttpResponse {
    match error {
        ListingError::NotFound => HttpResponse::NotFound()
            .json(ErrorResponse::new("PROPERTY_NOT_FOUND", error.to_string())),
        ListingError::AccessCodeRequired => HttpResponse::Forbidden()
            .json(ErrorResponse::new("ACCESS_CODE_REQUIRED", error.to_string())),
        ListingError::InvalidAccessCode => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("INVALID_ACCESS_CODE", error.to_string())),
        ListingError::InvalidAccessCodeFormat => HttpResponse::BadRequest().json(
            ErrorResponse::new("INVALID_ACCESS_CODE_FORMAT", error.to_string()),
        ),
        ListingError::Unauthorized => HttpResponse::Forbidden()
            .json(ErrorResponse::new("NOT_OWNER", error.to_string())),
        ListingError::AccessCodeAttemptsExceeded { .. } => HttpResponse::TooManyRequests()
            .json(ErrorResponse::new("RATE_LIMIT_EXCEEDED", error.to_string())),
    }
}

fn validation_error_response(error: &ValidationError) -> HttpResponse {
    match error {
        ValidationError::RequiredField { .. } | ValidationError::InvalidFormat { .. } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_ERROR", error.to_string()))
        }
    }
}
