//! Mock implementation of AccessLogRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::access_log::{AccessLog, ApprovalStatus};
use crate::errors::DomainError;

use super::AccessLogRepository;

/// Mock implementation of AccessLogRepository for testing
///
/// The employee-scoped views join through the owning code, so tests seed the
/// code ownership map alongside the log rows.
pub struct MockAccessLogRepository {
    logs: Arc<Mutex<Vec<AccessLog>>>,
    code_owners: Arc<Mutex<HashMap<Uuid, Uuid>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAccessLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            code_owners: Arc::new(Mutex::new(HashMap::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Seed a log row
    pub fn insert(&self, log: AccessLog) {
        self.logs.lock().unwrap().push(log);
    }

    /// Register which employee owns a verification code
    pub fn set_code_owner(&self, code_id: Uuid, employee_id: Uuid) {
        self.code_owners.lock().unwrap().insert(code_id, employee_id);
    }

    /// Get all stored logs for testing
    pub fn get_all(&self) -> Vec<AccessLog> {
        self.logs.lock().unwrap().clone()
    }

    fn fail_if_requested(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Internal {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }

    fn owned_by(&self, log: &AccessLog, employee_id: Uuid) -> bool {
        let owners = self.code_owners.lock().unwrap();
        log.verification_code_id
            .and_then(|code_id| owners.get(&code_id).copied())
            == Some(employee_id)
    }
}

impl Default for MockAccessLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn page(mut logs: Vec<AccessLog>, offset: i64, limit: i64) -> Vec<AccessLog> {
    logs.sort_by(|a, b| b.accessed_at.cmp(&a.accessed_at));
    logs.into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl AccessLogRepository for MockAccessLogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessLog>, DomainError> {
        self.fail_if_requested()?;
        let logs = self.logs.lock().unwrap();
        Ok(logs.iter().find(|l| l.id == id).cloned())
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        self.fail_if_requested()?;
        let logs = self.logs.lock().unwrap();
        let owned: Vec<AccessLog> = logs
            .iter()
            .filter(|l| self.owned_by(l, employee_id))
            .cloned()
            .collect();
        Ok(page(owned, offset, limit))
    }

    async fn list_by_employer(
        &self,
        employer_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        self.fail_if_requested()?;
        let logs = self.logs.lock().unwrap();
        let owned: Vec<AccessLog> = logs
            .iter()
            .filter(|l| l.employer_id == employer_id)
            .cloned()
            .collect();
        Ok(page(owned, offset, limit))
    }

    async fn list_by_code(
        &self,
        verification_code_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        self.fail_if_requested()?;
        let logs = self.logs.lock().unwrap();
        let matching: Vec<AccessLog> = logs
            .iter()
            .filter(|l| l.verification_code_id == Some(verification_code_id))
            .cloned()
            .collect();
        Ok(page(matching, offset, limit))
    }

    async fn list_pending_approvals(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        self.fail_if_requested()?;
        let logs = self.logs.lock().unwrap();
        let pending: Vec<AccessLog> = logs
            .iter()
            .filter(|l| {
                l.requires_approval
                    && l.approval_status == Some(ApprovalStatus::Pending)
                    && self.owned_by(l, employee_id)
            })
            .cloned()
            .collect();
        Ok(page(pending, offset, limit))
    }

    async fn decide(
        &self,
        log_id: Uuid,
        decision: ApprovalStatus,
        approver_id: Uuid,
        decided_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let mut logs = self.logs.lock().unwrap();
        let Some(log) = logs.iter_mut().find(|l| l.id == log_id) else {
            return Ok(false);
        };
        if matches!(
            log.approval_status,
            Some(ApprovalStatus::Approved) | Some(ApprovalStatus::Denied)
        ) {
            return Ok(false);
        }
        log.approval_status = Some(decision);
        log.approved_by = Some(approver_id);
        log.approved_at = Some(decided_at);
        Ok(true)
    }

    async fn count_by_employee(
        &self,
        employee_id: Uuid,
        success: Option<bool>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, DomainError> {
        self.fail_if_requested()?;
        let logs = self.logs.lock().unwrap();
        Ok(logs
            .iter()
            .filter(|l| self.owned_by(l, employee_id))
            .filter(|l| success.map_or(true, |s| l.success == s))
            .filter(|l| since.map_or(true, |t| l.accessed_at >= t))
            .count() as u64)
    }

    async fn count_by_employer(
        &self,
        employer_id: Uuid,
        success: Option<bool>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, DomainError> {
        self.fail_if_requested()?;
        let logs = self.logs.lock().unwrap();
        Ok(logs
            .iter()
            .filter(|l| l.employer_id == employer_id)
            .filter(|l| success.map_or(true, |s| l.success == s))
            .filter(|l| since.map_or(true, |t| l.accessed_at >= t))
            .count() as u64)
    }
}
