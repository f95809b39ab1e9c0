//! Stateless token issue/verify implementation
//!
//! Validity is signature plus time-window checks only; there is no
//! server-side revocation list, so a token stays live until natural expiry
//! even if the account's PIN changes afterwards.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenScope, JWT_ISSUER};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying signed bearer tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a long-lived session token for an authenticated phone number
    pub fn issue_session_token(&self, phone_number: &str) -> Result<String, DomainError> {
        let claims =
            Claims::new_session_token(phone_number, self.config.session_token_expiry_days);
        self.encode_jwt(&claims)
    }

    /// Issues a short-lived intermediate token proving a fresh OTP check
    pub fn issue_otp_token(&self, phone_number: &str) -> Result<String, DomainError> {
        let claims = Claims::new_otp_token(phone_number, self.config.otp_token_expiry_minutes);
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature and time window, returning the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        DomainError::Token(TokenError::TokenNotYetValid)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken
                    | jsonwebtoken::errors::ErrorKind::Base64(_)
                    | jsonwebtoken::errors::ErrorKind::Json(_)
                    | jsonwebtoken::errors::ErrorKind::Utf8(_) => {
                        DomainError::Token(TokenError::InvalidTokenFormat)
                    }
                    _ => DomainError::Token(TokenError::InvalidClaims),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verifies a session token for ordinary request authorization
    ///
    /// An intermediate OTP token is rejected here: it only proves a recent
    /// OTP check, not an established session.
    pub fn verify_session_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify_token(token)?;

        if claims.scope != TokenScope::Session {
            return Err(DomainError::Token(TokenError::InvalidScope));
        }

        Ok(claims)
    }

    /// Verifies the intermediate token gating the final phase of signup and
    /// PIN reset
    ///
    /// The token must carry the `otp` scope and its subject must equal the
    /// phone number the client is acting on.
    pub fn verify_otp_token(
        &self,
        token: &str,
        phone_number: &str,
    ) -> Result<Claims, DomainError> {
        let claims = self.verify_token(token)?;

        if claims.scope != TokenScope::Otp {
            return Err(DomainError::Token(TokenError::InvalidScope));
        }
        if claims.phone_number() != phone_number {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(claims)
    }
}
