//! Verification code repository trait.
//!
//! The code string column carries a unique index; `create` surfaces a
//! collision as `DomainError::Conflict` so the caller can retry with a fresh
//! candidate. A pre-existence check alone is not enough under concurrent
//! creation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for VerificationCode entity persistence operations
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert a new verification code
    ///
    /// # Returns
    /// * `Ok(VerificationCode)` - The created code
    /// * `Err(DomainError::Conflict)` - The code string collided with an
    ///   existing one; the caller should regenerate and retry
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Find a code by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationCode>, DomainError>;

    /// Find a code by its externally presented string
    async fn find_by_code(&self, code: &str) -> Result<Option<VerificationCode>, DomainError>;

    /// List codes issued by an employee, newest first
    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<VerificationCode>, DomainError>;

    /// Count codes issued by an employee
    async fn count_by_employee(&self, employee_id: Uuid) -> Result<u64, DomainError>;

    /// Set a code's status to revoked
    ///
    /// The write is unconditional: revoking an already expired or used code
    /// overwrites the status (idempotent tombstone).
    async fn revoke(&self, id: Uuid) -> Result<(), DomainError>;

    /// Transition every active code whose expiry has passed to expired
    ///
    /// Returns the number of codes transitioned.
    async fn expire_sweep(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
