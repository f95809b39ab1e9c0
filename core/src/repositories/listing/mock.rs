//! Mock implementation of ListingRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::errors::{DomainError, ListingError};

use super::trait_::ListingRepository;

/// In-memory listing repository for tests and no-database development
pub struct MockListingRepository {
    listings: Arc<RwLock<HashMap<Uuid, Listing>>>,
}

impl MockListingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            listings: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockListingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingRepository for MockListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;
        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(listings.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        let mut owned: Vec<Listing> = listings
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update_access(&self, listing: Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;

        if !listings.contains_key(&listing.id) {
            return Err(DomainError::Listing(ListingError::NotFound));
        }

        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }
}
