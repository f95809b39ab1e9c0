//! Listing entity representing a real-estate plot listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Listing entity for a single plot
///
/// `details` is an opaque structured payload assembled by the listing
/// wizard (description, price, measurements, location link, ...); the
/// backend stores and returns it without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier for the listing
    pub id: Uuid,

    /// Listing title
    pub title: String,

    /// Opaque listing payload, uninterpreted by the core
    pub details: serde_json::Value,

    /// Creating user; immutable after creation
    pub owner_id: Uuid,

    /// Bcrypt hash of the 4-digit access code; present when the listing
    /// has ever been made private
    #[serde(skip_serializing, default)]
    pub access_code_hash: Option<String>,

    /// Whether read access requires the access code
    pub is_private: bool,

    /// Timestamp when the listing was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the listing was last updated
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Creates a new public listing
    pub fn new(owner_id: Uuid, title: String, details: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            details,
            owner_id,
            access_code_hash: None,
            is_private: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Updates the visibility flag and, when a new hash is supplied,
    /// replaces the stored access code hash. A `None` hash keeps the
    /// previous one, matching the access-update semantics where an empty
    /// code field leaves the old code in place.
    pub fn set_access(&mut self, is_private: bool, access_code_hash: Option<String>) {
        if let Some(hash) = access_code_hash {
            self.access_code_hash = Some(hash);
        }
        self.is_private = is_private;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_listing_is_public() {
        let owner = Uuid::new_v4();
        let listing = Listing::new(owner, "Plot A".to_string(), json!({"price": 250000}));

        assert_eq!(listing.owner_id, owner);
        assert!(!listing.is_private);
        assert!(listing.access_code_hash.is_none());
    }

    #[test]
    fn test_set_access_replaces_hash() {
        let mut listing = Listing::new(Uuid::new_v4(), "Plot A".to_string(), json!({}));

        listing.set_access(true, Some("$2b$12$hash".to_string()));
        assert!(listing.is_private);
        assert_eq!(listing.access_code_hash.as_deref(), Some("$2b$12$hash"));
    }

    #[test]
    fn test_set_access_keeps_old_hash_when_none_supplied() {
        let mut listing = Listing::new(Uuid::new_v4(), "Plot A".to_string(), json!({}));
        listing.set_access(true, Some("$2b$12$hash".to_string()));

        listing.set_access(false, None);
        assert!(!listing.is_private);
        assert_eq!(listing.access_code_hash.as_deref(), Some("$2b$12$hash"));
    }

    #[test]
    fn test_access_code_hash_not_serialized() {
        let mut listing = Listing::new(Uuid::new_v4(), "Plot A".to_string(), json!({}));
        listing.set_access(true, Some("$2b$12$secret".to_string()));

        let json = serde_json::to_string(&listing).unwrap();
        assert!(!json.contains("access_code_hash"));
        assert!(!json.contains("secret"));
    }
}
