//! Mock implementation of RedemptionStore for testing.
//!
//! All state lives behind one mutex so `commit_attempt` is atomic exactly
//! like the transactional MySQL implementation, which makes the mock usable
//! for concurrency tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::access_log::AccessLog;
use crate::domain::entities::employment::Employment;
use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::{CodeStatus, VerificationCode};
use crate::errors::DomainError;

use super::{CodeMutation, RedemptionRecord, RedemptionStore};

#[derive(Default)]
struct State {
    codes: Vec<VerificationCode>,
    employments: Vec<Employment>,
    users: Vec<User>,
    logs: Vec<AccessLog>,
}

/// Mock implementation of RedemptionStore for testing
pub struct MockRedemptionStore {
    state: Arc<Mutex<State>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockRedemptionStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Seed a verification code
    pub fn insert_code(&self, code: VerificationCode) {
        self.state.lock().unwrap().codes.push(code);
    }

    /// Seed an employment record
    pub fn insert_employment(&self, employment: Employment) {
        self.state.lock().unwrap().employments.push(employment);
    }

    /// Seed a user
    pub fn insert_user(&self, user: User) {
        self.state.lock().unwrap().users.push(user);
    }

    /// Get a stored code by id
    pub fn get_code(&self, id: Uuid) -> Option<VerificationCode> {
        self.state
            .lock()
            .unwrap()
            .codes
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Get all audit log rows written so far
    pub fn get_logs(&self) -> Vec<AccessLog> {
        self.state.lock().unwrap().logs.clone()
    }

    fn fail_if_requested(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Internal {
                message: "Mock store error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockRedemptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RedemptionStore for MockRedemptionStore {
    async fn load_for_redemption(
        &self,
        code: &str,
    ) -> Result<Option<RedemptionRecord>, DomainError> {
        self.fail_if_requested()?;
        let state = self.state.lock().unwrap();
        let Some(code) = state.codes.iter().find(|c| c.code == code).cloned() else {
            return Ok(None);
        };
        let employment = state
            .employments
            .iter()
            .find(|e| e.id == code.employment_id)
            .cloned()
            .ok_or_else(|| DomainError::internal("employment missing for code"))?;
        let employee = state
            .users
            .iter()
            .find(|u| u.id == code.employee_id)
            .cloned()
            .ok_or_else(|| DomainError::internal("employee missing for code"))?;
        Ok(Some(RedemptionRecord {
            code,
            employment,
            employee,
        }))
    }

    async fn commit_attempt(
        &self,
        mutation: CodeMutation,
        log: &AccessLog,
    ) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let mut state = self.state.lock().unwrap();

        match mutation {
            CodeMutation::None => {}
            CodeMutation::MarkExpired { code_id } => {
                if let Some(code) = state.codes.iter_mut().find(|c| c.id == code_id) {
                    if code.status == CodeStatus::Active {
                        code.status = CodeStatus::Expired;
                        code.updated_at = Some(Utc::now());
                    }
                }
            }
            CodeMutation::Consume { code_id, now } => {
                let Some(code) = state.codes.iter_mut().find(|c| {
                    c.id == code_id
                        && c.status == CodeStatus::Active
                        && c.current_usage_count < c.max_usage_count
                }) else {
                    // Race lost: leave state and logs untouched
                    return Ok(false);
                };
                code.current_usage_count += 1;
                code.last_used_at = Some(now);
                code.updated_at = Some(Utc::now());
                if code.current_usage_count >= code.max_usage_count {
                    code.status = CodeStatus::Used;
                }
            }
        }

        state.logs.push(log.clone());
        Ok(true)
    }
}
