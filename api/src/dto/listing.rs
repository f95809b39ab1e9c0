//! Listing DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use lx_core::domain::entities::listing::Listing;

/// POST /create-property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Opaque wizard payload, stored as-is
    pub details: serde_json::Value,
}

/// PUT /update-property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccessRequest {
    pub id: Uuid,
    /// Whether reads require the access code
    pub secure: bool,
    /// New 4-digit access code; absent or empty keeps the previous one
    pub access_code: Option<String>,
}

/// `pin` query parameter on GET /fetch-properties/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct AccessCodeQuery {
    pub pin: Option<String>,
}

/// GET /user-properties payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListingsResponse {
    pub count: usize,
    pub listings: Vec<Listing>,
}
