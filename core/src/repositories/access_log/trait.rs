//! Access log repository trait.
//!
//! Rows are appended by the redemption store (see `RedemptionStore`); this
//! trait only covers the read views and the approval workflow. Everything
//! but the approval fields is immutable once written.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::access_log::{AccessLog, ApprovalStatus};
use crate::errors::DomainError;

/// Repository trait for AccessLog read views and approval decisions
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Find a log entry by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessLog>, DomainError>;

    /// List log entries for codes issued by the employee, newest first
    ///
    /// Joins through the owning verification code.
    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError>;

    /// List log entries of the employer's own requests, newest first
    async fn list_by_employer(
        &self,
        employer_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError>;

    /// List log entries for one verification code, newest first
    async fn list_by_code(
        &self,
        verification_code_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError>;

    /// List undecided approval requests for codes issued by the employee
    async fn list_pending_approvals(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError>;

    /// Record an approval decision exactly once
    ///
    /// The update is conditional on the entry still being undecided.
    ///
    /// # Returns
    /// * `Ok(true)` - The decision was recorded
    /// * `Ok(false)` - The entry was already decided; nothing was written
    async fn decide(
        &self,
        log_id: Uuid,
        decision: ApprovalStatus,
        approver_id: Uuid,
        decided_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Count log entries for codes issued by the employee
    ///
    /// `success` filters by outcome when set; `since` restricts to entries
    /// accessed at or after the given time.
    async fn count_by_employee(
        &self,
        employee_id: Uuid,
        success: Option<bool>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, DomainError>;

    /// Count log entries of the employer's own requests
    async fn count_by_employer(
        &self,
        employer_id: Uuid,
        success: Option<bool>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, DomainError>;
}
