//! User entity representing a registered account in the LandX system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// Two creation paths exist: full signup (phone + OTP + PIN + display name)
/// and OTP-only login, which creates a user with neither PIN nor display
/// name. `pin_hash` and `display_name` are therefore optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Phone number in E.164 format, globally unique
    pub phone_number: String,

    /// Display name, set during full signup
    pub display_name: Option<String>,

    /// Bcrypt hash of the 4-digit PIN; never leaves the server
    #[serde(skip_serializing, default)]
    pub pin_hash: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a user from the OTP-only login path (no PIN, no display name)
    pub fn new(phone_number: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone_number,
            display_name: None,
            pin_hash: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Creates a fully registered user with display name and hashed PIN
    pub fn with_credentials(
        phone_number: String,
        display_name: String,
        pin_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone_number,
            display_name: Some(display_name),
            pin_hash: Some(pin_hash),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Overwrites the stored PIN hash
    pub fn set_pin_hash(&mut self, pin_hash: String) {
        self.pin_hash = Some(pin_hash);
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Checks whether a PIN has been set for this account
    pub fn has_pin(&self) -> bool {
        self.pin_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_only_user_creation() {
        let user = User::new("+911234567890".to_string());

        assert_eq!(user.phone_number, "+911234567890");
        assert_eq!(user.display_name, None);
        assert!(!user.has_pin());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_full_user_creation() {
        let user = User::with_credentials(
            "+911234567890".to_string(),
            "Asha".to_string(),
            "$2b$12$hash".to_string(),
        );

        assert_eq!(user.display_name.as_deref(), Some("Asha"));
        assert!(user.has_pin());
    }

    #[test]
    fn test_set_pin_hash() {
        let mut user = User::new("+911234567890".to_string());

        assert!(!user.has_pin());
        user.set_pin_hash("$2b$12$hash".to_string());
        assert!(user.has_pin());
    }

    #[test]
    fn test_update_last_login() {
        let mut user = User::new("+911234567890".to_string());

        assert!(user.last_login_at.is_none());
        user.update_last_login();
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn test_pin_hash_not_serialized() {
        let user = User::with_credentials(
            "+911234567890".to_string(),
            "Asha".to_string(),
            "$2b$12$secret".to_string(),
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("pin_hash"));
        assert!(!json.contains("secret"));
    }
}
