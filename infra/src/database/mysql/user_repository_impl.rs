//! MySQL implementation of the UserRepository trait.
//!
//! Phone-number uniqueness is enforced by a unique index on
//! `users.phone_number`; a racing insert surfaces as `DuplicateUser`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use lx_core::domain::entities::user::User;
use lx_core::errors::{AuthError, DomainError};
use lx_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            phone_number: row.try_get("phone_number").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone_number: {}", e),
            })?,
            display_name: row.try_get("display_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get display_name: {}", e),
            })?,
            pin_hash: row.try_get("pin_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get pin_hash: {}", e),
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
            last_login_at: row.try_get("last_login_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get last_login_at: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, phone_number, display_name, pin_hash,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE phone_number = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by phone: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, phone_number, display_name, pin_hash,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, phone_number, display_name, pin_hash,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.phone_number)
            .bind(&user.display_name)
            .bind(&user.pin_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::DuplicateUser)
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET display_name = ?, pin_hash = ?, updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.display_name)
            .bind(&user.pin_hash)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        Ok(user)
    }

    async fn set_pin_hash(&self, id: Uuid, pin_hash: &str) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET pin_hash = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(pin_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to set pin hash: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        Ok(())
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = ?) AS present";

        let row = sqlx::query(query)
            .bind(phone_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check user existence: {}", e),
            })?;

        let present: i64 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        Ok(present == 1)
    }
}
