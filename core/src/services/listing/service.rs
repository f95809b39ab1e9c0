//! Listing service implementation
//!
//! Reads are gated by the per-listing access code when the owner has marked
//! the listing private. The code is stored bcrypt-hashed, guesses are
//! throttled per listing, and mutation of the access settings is restricted
//! to the owner.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::errors::{AuthError, DomainError, DomainResult, ListingError, ValidationError};
use crate::repositories::{ListingRepository, UserRepository};
use crate::services::auth::{hash_secret, is_valid_access_code, verify_secret, RateLimiterTrait};

/// Listing service handling CRUD and the access guard
pub struct ListingService<U, L, R>
where
    U: UserRepository,
    L: ListingRepository,
    R: RateLimiterTrait,
{
    /// User repository, used to resolve the caller's identity claim
    user_repository: Arc<U>,
    /// Listing repository for persistence
    listing_repository: Arc<L>,
    /// Rate limiter for access-code guesses
    rate_limiter: Arc<R>,
}

impl<U, L, R> ListingService<U, L, R>
where
    U: UserRepository,
    L: ListingRepository,
    R: RateLimiterTrait,
{
    /// Create a new listing service
    pub fn new(
        user_repository: Arc<U>,
        listing_repository: Arc<L>,
        rate_limiter: Arc<R>,
    ) -> Self {
        Self {
            user_repository,
            listing_repository,
            rate_limiter,
        }
    }

    /// Create a listing owned by the authenticated caller
    ///
    /// New listings start public; the owner opts into protection through
    /// `set_access`.
    pub async fn create_listing(
        &self,
        caller_phone: &str,
        title: &str,
        details: Value,
    ) -> DomainResult<Listing> {
        let owner = self.resolve_caller(caller_phone).await?;

        if title.trim().is_empty() {
            return Err(DomainError::ValidationErr(ValidationError::RequiredField {
                field: "title".to_string(),
            }));
        }

        let listing = self
            .listing_repository
            .create(Listing::new(owner, title.trim().to_string(), details))
            .await?;

        info!(listing_id = %listing.id, "Listing created");

        Ok(listing)
    }

    /// Fetch a listing, enforcing the access-code guard
    ///
    /// Public listings are returned unconditionally, requester identity is
    /// never consulted. Private listings require the matching code:
    /// * no code supplied → `AccessCodeRequired` (distinct from `NotFound`,
    ///   so clients can prompt for a code instead of showing a dead end)
    /// * wrong code → `InvalidAccessCode`, counted against the guess limit
    ///
    /// Safe to retry; the listing itself is never modified here.
    pub async fn fetch_listing(
        &self,
        id: Uuid,
        supplied_code: Option<&str>,
    ) -> DomainResult<Listing> {
        let listing = self
            .listing_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::Listing(ListingError::NotFound))?;

        if !listing.is_private {
            return Ok(listing);
        }

        let code = match supplied_code {
            Some(code) if !code.is_empty() => code,
            _ => return Err(DomainError::Listing(ListingError::AccessCodeRequired)),
        };

        self.ensure_attempts_remaining(&listing.id).await?;

        // A private listing always carries a hash (enforced at write time);
        // a missing one can only mean hand-edited data, and no code matches.
        let Some(hash) = listing.access_code_hash.as_deref() else {
            return Err(DomainError::Listing(ListingError::InvalidAccessCode));
        };

        if !verify_secret(code, hash)? {
            let _ = self
                .rate_limiter
                .increment_access_code_attempts(&listing.id.to_string())
                .await;
            warn!(listing_id = %listing.id, "Invalid access code attempt");
            return Err(DomainError::Listing(ListingError::InvalidAccessCode));
        }

        Ok(listing)
    }

    /// All listings owned by the authenticated caller, newest first
    pub async fn user_listings(&self, caller_phone: &str) -> DomainResult<Vec<Listing>> {
        let owner = self.resolve_caller(caller_phone).await?;
        self.listing_repository.find_by_owner(owner).await
    }

    /// Update a listing's visibility and access code
    ///
    /// Only the owner may mutate access settings. A supplied code must be 4
    /// numeric digits and replaces the stored hash; an absent or empty code
    /// keeps the previous one. Turning protection on requires that a code
    /// exists, either supplied now or retained from before.
    pub async fn set_access(
        &self,
        caller_phone: &str,
        listing_id: Uuid,
        is_private: bool,
        access_code: Option<&str>,
    ) -> DomainResult<Listing> {
        let caller = self.resolve_caller(caller_phone).await?;

        let mut listing = self
            .listing_repository
            .find_by_id(listing_id)
            .await?
            .ok_or(DomainError::Listing(ListingError::NotFound))?;

        if listing.owner_id != caller {
            warn!(listing_id = %listing_id, "Access update rejected: caller is not the owner");
            return Err(DomainError::Listing(ListingError::Unauthorized));
        }

        let new_hash = match access_code {
            Some(code) if !code.is_empty() => {
                if !is_valid_access_code(code) {
                    return Err(DomainError::Listing(ListingError::InvalidAccessCodeFormat));
                }
                Some(hash_secret(code)?)
            }
            _ => None,
        };

        if is_private && new_hash.is_none() && listing.access_code_hash.is_none() {
            return Err(DomainError::Listing(ListingError::InvalidAccessCodeFormat));
        }

        listing.set_access(is_private, new_hash);
        let listing = self.listing_repository.update_access(listing).await?;

        info!(
            listing_id = %listing.id,
            is_private = listing.is_private,
            "Listing access updated"
        );

        Ok(listing)
    }

    /// Resolve the caller's phone claim to a user id
    async fn resolve_caller(&self, caller_phone: &str) -> DomainResult<Uuid> {
        let user = self
            .user_repository
            .find_by_phone(caller_phone)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;
        Ok(user.id)
    }

    /// Fail fast when the listing's guess allowance is exhausted
    async fn ensure_attempts_remaining(&self, listing_id: &Uuid) -> DomainResult<()> {
        let exhausted = self
            .rate_limiter
            .check_access_code_attempts(&listing_id.to_string())
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check access code attempts: {}", e),
            })?;

        if exhausted {
            let reset = self
                .rate_limiter
                .get_access_code_reset_time(&listing_id.to_string())
                .await
                .unwrap_or(Some(3600))
                .unwrap_or(3600);
            let minutes = (reset / 60).max(1) as u32;

            return Err(DomainError::Listing(
                ListingError::AccessCodeAttemptsExceeded { minutes },
            ));
        }

        Ok(())
    }
}
