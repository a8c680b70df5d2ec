//! Mock implementation of VerificationCodeRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodeStatus, VerificationCode};
use crate::errors::DomainError;

use super::VerificationCodeRepository;

/// Mock implementation of VerificationCodeRepository for testing
pub struct MockVerificationCodeRepository {
    codes: Arc<Mutex<Vec<VerificationCode>>>,
    should_fail: Arc<Mutex<bool>>,
    /// Number of upcoming create calls that will be reported as colliding,
    /// letting tests exercise the uniqueness retry loop
    forced_collisions: Arc<Mutex<u32>>,
}

impl MockVerificationCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            codes: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            forced_collisions: Arc::new(Mutex::new(0)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Force the next `count` create calls to report a collision
    pub fn force_collisions(&self, count: u32) {
        *self.forced_collisions.lock().unwrap() = count;
    }

    /// Seed a code directly into the store
    pub fn insert(&self, code: VerificationCode) {
        self.codes.lock().unwrap().push(code);
    }

    /// Get all stored codes for testing
    pub fn get_all(&self) -> Vec<VerificationCode> {
        self.codes.lock().unwrap().clone()
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

impl Default for MockVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        self.fail_if_requested()?;

        {
            let mut forced = self.forced_collisions.lock().unwrap();
            if *forced > 0 {
                *forced -= 1;
                return Err(DomainError::Conflict {
                    resource: format!("verification code {}", code.code),
                });
            }
        }

        let mut codes = self.codes.lock().unwrap();
        if codes.iter().any(|c| c.code == code.code) {
            return Err(DomainError::Conflict {
                resource: format!("verification code {}", code.code),
            });
        }
        codes.push(code.clone());
        Ok(code)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationCode>, DomainError> {
        self.fail_if_requested()?;
        let codes = self.codes.lock().unwrap();
        Ok(codes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<VerificationCode>, DomainError> {
        self.fail_if_requested()?;
        let codes = self.codes.lock().unwrap();
        Ok(codes.iter().find(|c| c.code == code).cloned())
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<VerificationCode>, DomainError> {
        self.fail_if_requested()?;
        let codes = self.codes.lock().unwrap();
        let mut result: Vec<VerificationCode> = codes
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_by_employee(&self, employee_id: Uuid) -> Result<u64, DomainError> {
        self.fail_if_requested()?;
        let codes = self.codes.lock().unwrap();
        Ok(codes.iter().filter(|c| c.employee_id == employee_id).count() as u64)
    }

    async fn revoke(&self, id: Uuid) -> Result<(), DomainError> {
        self.fail_if_requested()?;
        let mut codes = self.codes.lock().unwrap();
        if let Some(code) = codes.iter_mut().find(|c| c.id == id) {
            code.status = CodeStatus::Revoked;
            code.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn expire_sweep(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.fail_if_requested()?;
        let mut codes = self.codes.lock().unwrap();
        let mut affected = 0;
        for code in codes.iter_mut() {
            if code.status == CodeStatus::Active && code.expires_at <= now {
                code.status = CodeStatus::Expired;
                code.updated_at = Some(Utc::now());
                affected += 1;
            }
        }
        Ok(affected)
    }
}
