//! MySQL implementation of the ListingRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use lx_core::domain::entities::listing::Listing;
use lx_core::errors::{DomainError, ListingError};
use lx_core::repositories::ListingRepository;

/// MySQL implementation of ListingRepository
pub struct MySqlListingRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlListingRepository {
    /// Create a new MySQL listing repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Listing entity
    fn row_to_listing(row: &sqlx::mysql::MySqlRow) -> Result<Listing, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;
        let owner_id: String = row.try_get("owner_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get owner_id: {}", e),
        })?;

        Ok(Listing {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid listing UUID: {}", e),
            })?,
            title: row.try_get("title").map_err(|e| DomainError::Internal {
                message: format!("Failed to get title: {}", e),
            })?,
            details: row
                .try_get::<serde_json::Value, _>("details")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get details: {}", e),
                })?,
            owner_id: Uuid::parse_str(&owner_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid owner UUID: {}", e),
            })?,
            access_code_hash: row
                .try_get("access_code_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get access_code_hash: {}", e),
                })?,
            is_private: row.try_get("is_private").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_private: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl ListingRepository for MySqlListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        let query = r#"
            INSERT INTO listings (
                id, title, details, owner_id,
                access_code_hash, is_private, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(listing.id.to_string())
            .bind(&listing.title)
            .bind(&listing.details)
            .bind(listing.owner_id.to_string())
            .bind(&listing.access_code_hash)
            .bind(listing.is_private)
            .bind(listing.created_at)
            .bind(listing.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create listing: {}", e),
            })?;

        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        let query = r#"
            SELECT id, title, details, owner_id,
                   access_code_hash, is_private, created_at, updated_at
            FROM listings
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find listing: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_listing(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let query = r#"
            SELECT id, title, details, owner_id,
                   access_code_hash, is_private, created_at, updated_at
            FROM listings
            WHERE owner_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to list listings by owner: {}", e),
            })?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    async fn update_access(&self, listing: Listing) -> Result<Listing, DomainError> {
        let query = r#"
            UPDATE listings
            SET is_private = ?, access_code_hash = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(listing.is_private)
            .bind(&listing.access_code_hash)
            .bind(listing.updated_at)
            .bind(listing.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update listing access: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Listing(ListingError::NotFound));
        }

        Ok(listing)
    }
}
