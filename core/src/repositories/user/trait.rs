//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and uses Result types for proper error handling.
//! Implementations handle the actual database operations while maintaining
//! the abstraction boundary between domain and infrastructure layers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check if a user exists with the given email address
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check if the given employee public ID is already taken
    async fn exists_by_public_id(&self, public_id: &str) -> Result<bool, DomainError>;

    /// Check if the given employer number is already taken
    async fn exists_by_employer_number(&self, employer_number: i32)
        -> Result<bool, DomainError>;

    /// Check if the given company handle is already taken
    async fn exists_by_company_handle(&self, handle: &str) -> Result<bool, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Conflict)` - A user with this email already exists
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Record a successful login for the user
    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete a user
    ///
    /// Deletes cascade to the user's employments and verification codes.
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
