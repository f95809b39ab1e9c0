//! Authentication session value object.

use serde::{Deserialize, Serialize};

use crate::domain::entities::listing::Listing;
use crate::domain::entities::user::User;

/// Result of a successful authentication
///
/// Carries the session bearer token, the profile fields the clients render,
/// and the user's listings (sign-in and OTP login return them so the client
/// can go straight to the dashboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Signed session bearer token
    pub token: String,

    /// Phone number of the authenticated user
    pub phone_number: String,

    /// Display name, absent for OTP-only accounts
    pub display_name: Option<String>,

    /// Listings owned by the authenticated user
    pub listings: Vec<Listing>,
}

impl AuthSession {
    /// Builds a session from a user, a freshly issued token, and listings
    pub fn new(token: String, user: &User, listings: Vec<Listing>) -> Self {
        Self {
            token,
            phone_number: user.phone_number.clone(),
            display_name: user.display_name.clone(),
            listings,
        }
    }
}
