//! Employment repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::employment::Employment;
use crate::errors::DomainError;

/// Repository trait for Employment entity persistence operations
#[async_trait]
pub trait EmploymentRepository: Send + Sync {
    /// Create a new employment record
    async fn create(&self, employment: Employment) -> Result<Employment, DomainError>;

    /// Find an employment record by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employment>, DomainError>;

    /// List employment records for an employee, newest first
    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Employment>, DomainError>;

    /// Count employment records for an employee
    async fn count_by_employee(&self, employee_id: Uuid) -> Result<u64, DomainError>;

    /// Update an existing employment record
    async fn update(&self, employment: Employment) -> Result<Employment, DomainError>;

    /// Mark every other employment of the employee as ended
    ///
    /// Used when one record is promoted to the current employment. Returns
    /// the number of records transitioned.
    async fn end_all_except(
        &self,
        employee_id: Uuid,
        keep_id: Uuid,
        end_date: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// Delete an employment record
    ///
    /// # Returns
    /// * `Ok(true)` - Record was deleted
    /// * `Ok(false)` - Record not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
