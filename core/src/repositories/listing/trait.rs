//! Listing repository trait defining the interface for listing persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::errors::DomainError;

/// Repository trait for Listing entity persistence operations
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Find a listing by unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError>;

    /// All listings owned by a user, newest first
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError>;

    /// Persist updated access-control fields (`is_private`, access code hash)
    async fn update_access(&self, listing: Listing) -> Result<Listing, DomainError>;
}
