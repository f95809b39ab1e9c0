//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and keeps the abstraction boundary between the
//! domain and the infrastructure layer: implementations live in `lx_infra`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by phone number (E.164)
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given phone number
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// The store enforces a uniqueness constraint on `phone_number`; a
    /// concurrent insert racing past an existence check must surface as
    /// `AuthError::DuplicateUser`, never as a silent duplicate.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user in place
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite the stored PIN hash for a user
    ///
    /// # Returns
    /// * `Ok(())` - Hash replaced
    /// * `Err(DomainError::Auth(UserNotFound))` - No such user
    async fn set_pin_hash(&self, id: Uuid, pin_hash: &str) -> Result<(), DomainError>;

    /// Check whether a user exists with the given phone number
    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError>;
}
