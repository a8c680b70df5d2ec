//! Main access log service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sl_shared::types::Pagination;

use crate::domain::entities::access_log::{AccessLog, ApprovalStatus};
use crate::domain::entities::user::{User, UserType};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccessLogRepository, VerificationCodeRepository};

/// Aggregated redemption statistics for one employee or employer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessStats {
    /// Total redemption attempts
    pub total_requests: u64,

    /// Attempts that disclosed data
    pub successful_requests: u64,

    /// Rejected attempts
    pub failed_requests: u64,

    /// Success percentage (0-100)
    pub success_rate: f64,

    /// Attempts in the last 30 days
    pub recent_requests: u64,
}

/// Service exposing the audit ledger's read views and approval workflow
pub struct AccessLogService<A, V>
where
    A: AccessLogRepository,
    V: VerificationCodeRepository,
{
    log_repository: Arc<A>,
    code_repository: Arc<V>,
}

impl<A, V> AccessLogService<A, V>
where
    A: AccessLogRepository,
    V: VerificationCodeRepository,
{
    /// Create a new access log service
    pub fn new(log_repository: Arc<A>, code_repository: Arc<V>) -> Self {
        Self {
            log_repository,
            code_repository,
        }
    }

    /// List logs visible to the user: employees see attempts against their
    /// codes, employers see their own requests
    pub async fn list_for_user(
        &self,
        user: &User,
        pagination: &Pagination,
    ) -> DomainResult<Vec<AccessLog>> {
        match user.user_type {
            UserType::Employee => {
                self.log_repository
                    .list_by_employee(user.id, pagination.offset_i64(), pagination.limit_i64())
                    .await
            }
            UserType::Employer => {
                self.log_repository
                    .list_by_employer(user.id, pagination.offset_i64(), pagination.limit_i64())
                    .await
            }
        }
    }

    /// Get one log entry with role-scoped access control
    pub async fn get_log(&self, log_id: Uuid, requester: &User) -> DomainResult<AccessLog> {
        let log = self
            .log_repository
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| DomainError::not_found("access log"))?;

        let can_access = match requester.user_type {
            UserType::Employer => log.employer_id == requester.id,
            UserType::Employee => self.log_owned_by(&log, requester.id).await?,
        };
        if !can_access {
            return Err(DomainError::forbidden("Not enough permissions"));
        }
        Ok(log)
    }

    /// List logs for one verification code
    ///
    /// Returns an empty list - not an error - when the code does not belong
    /// to the requesting employee, hiding whether the code exists at all.
    pub async fn list_for_code(
        &self,
        code_id: Uuid,
        employee_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Vec<AccessLog>> {
        let owned = self
            .code_repository
            .find_by_id(code_id)
            .await?
            .map(|code| code.employee_id == employee_id)
            .unwrap_or(false);
        if !owned {
            return Ok(Vec::new());
        }

        self.log_repository
            .list_by_code(code_id, pagination.offset_i64(), pagination.limit_i64())
            .await
    }

    /// List the employee's undecided approval requests
    pub async fn pending_approvals(
        &self,
        employee_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<Vec<AccessLog>> {
        self.log_repository
            .list_pending_approvals(employee_id, pagination.offset_i64(), pagination.limit_i64())
            .await
    }

    /// Approve a logged redemption request
    pub async fn approve(&self, log_id: Uuid, approver_id: Uuid) -> DomainResult<AccessLog> {
        self.decide(log_id, approver_id, ApprovalStatus::Approved).await
    }

    /// Deny a logged redemption request
    pub async fn deny(&self, log_id: Uuid, approver_id: Uuid) -> DomainResult<AccessLog> {
        self.decide(log_id, approver_id, ApprovalStatus::Denied).await
    }

    /// Aggregate redemption statistics for the user
    pub async fn stats(&self, user: &User) -> DomainResult<AccessStats> {
        let thirty_days_ago = Utc::now() - Duration::days(30);
        let (total, successful, recent) = match user.user_type {
            UserType::Employee => (
                self.log_repository
                    .count_by_employee(user.id, None, None)
                    .await?,
                self.log_repository
                    .count_by_employee(user.id, Some(true), None)
                    .await?,
                self.log_repository
                    .count_by_employee(user.id, None, Some(thirty_days_ago))
                    .await?,
            ),
            UserType::Employer => (
                self.log_repository
                    .count_by_employer(user.id, None, None)
                    .await?,
                self.log_repository
                    .count_by_employer(user.id, Some(true), None)
                    .await?,
                self.log_repository
                    .count_by_employer(user.id, None, Some(thirty_days_ago))
                    .await?,
            ),
        };

        let success_rate = if total > 0 {
            successful as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Ok(AccessStats {
            total_requests: total,
            successful_requests: successful,
            failed_requests: total - successful,
            success_rate,
            recent_requests: recent,
        })
    }

    /// Record an approval decision; write-once by construction
    async fn decide(
        &self,
        log_id: Uuid,
        approver_id: Uuid,
        decision: ApprovalStatus,
    ) -> DomainResult<AccessLog> {
        let log = self
            .log_repository
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| DomainError::not_found("access log"))?;

        if !self.log_owned_by(&log, approver_id).await? {
            return Err(DomainError::forbidden("Not enough permissions"));
        }

        let recorded = self
            .log_repository
            .decide(log_id, decision, approver_id, Utc::now())
            .await?;
        if !recorded {
            return Err(DomainError::BusinessRule {
                message: "Access request has already been decided".to_string(),
            });
        }

        tracing::info!(
            log_id = %log_id,
            decision = decision.as_str(),
            "Recorded approval decision"
        );

        self.log_repository
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| DomainError::not_found("access log"))
    }

    /// Checks whether the log's underlying code belongs to the employee
    ///
    /// Logs without a code reference (unknown-code attempts) belong to
    /// nobody.
    async fn log_owned_by(&self, log: &AccessLog, employee_id: Uuid) -> DomainResult<bool> {
        let Some(code_id) = log.verification_code_id else {
            return Ok(false);
        };
        Ok(self
            .code_repository
            .find_by_id(code_id)
            .await?
            .map(|code| code.employee_id == employee_id)
            .unwrap_or(false))
    }
}
