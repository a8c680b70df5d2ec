//! Mock implementation of UserRepository for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::UserRepository;

/// Mock implementation of UserRepository for testing
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Seed a user directly into the store
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    /// Get all stored users for testing
    pub fn get_all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn fail_if_requested(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Internal {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fail_if_requested()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fail_if_requested()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email == email))
    }

    async fn exists_by_public_id(&self, public_id: &str) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.public_id.as_deref() == Some(public_id)))
    }

    async fn exists_by_employer_number(
        &self,
        employer_number: i32,
    ) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.employer_number == Some(employer_number)))
    }

    async fn exists_by_company_handle(&self, handle: &str) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .any(|u| u.company_handle.as_deref() == Some(handle)))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.fail_if_requested()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict {
                resource: format!("user email {}", user.email),
            });
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.fail_if_requested()?;
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(DomainError::not_found("user")),
        }
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        self.fail_if_requested()?;
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.last_login_at = Some(Utc::now());
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let mut users = self.users.lock().unwrap();
        let initial = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < initial)
    }
}
