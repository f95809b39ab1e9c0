//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// In-memory user repository for tests and no-database development
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        // Mirror the unique index on phone_number
        if users.values().any(|u| u.phone_number == user.phone_number) {
            return Err(DomainError::Auth(AuthError::DuplicateUser));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_pin_hash(&self, id: Uuid, pin_hash: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                user.set_pin_hash(pin_hash.to_string());
                Ok(())
            }
            None => Err(DomainError::Auth(AuthError::UserNotFound)),
        }
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.phone_number == phone_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find_by_phone() {
        let repo = MockUserRepository::new();
        let user = User::new("+911234567890".to_string());

        repo.create(user.clone()).await.unwrap();

        let found = repo.find_by_phone("+911234567890").await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() {
        let repo = MockUserRepository::new();
        repo.create(User::new("+911234567890".to_string()))
            .await
            .unwrap();

        let result = repo.create(User::new("+911234567890".to_string())).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::DuplicateUser))
        ));
    }

    #[tokio::test]
    async fn test_set_pin_hash() {
        let repo = MockUserRepository::new();
        let user = repo
            .create(User::new("+911234567890".to_string()))
            .await
            .unwrap();

        repo.set_pin_hash(user.id, "$2b$12$hash").await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(found.has_pin());
    }

    #[tokio::test]
    async fn test_set_pin_hash_unknown_user() {
        let repo = MockUserRepository::new();

        let result = repo.set_pin_hash(Uuid::new_v4(), "$2b$12$hash").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::UserNotFound))
        ));
    }
}
