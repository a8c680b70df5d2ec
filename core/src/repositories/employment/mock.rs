//! Mock implementation of EmploymentRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::employment::{Employment, EmploymentStatus};
use crate::errors::DomainError;

use super::EmploymentRepository;

/// Mock implementation of EmploymentRepository for testing
pub struct MockEmploymentRepository {
    records: Arc<Mutex<Vec<Employment>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockEmploymentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Seed a record directly into the store
    pub fn insert(&self, employment: Employment) {
        self.records.lock().unwrap().push(employment);
    }

    /// Get all stored records for testing
    pub fn get_all(&self) -> Vec<Employment> {
        self.records.lock().unwrap().clone()
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

impl Default for MockEmploymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmploymentRepository for MockEmploymentRepository {
    async fn create(&self, employment: Employment) -> Result<Employment, DomainError> {
        self.fail_if_requested()?;
        self.records.lock().unwrap().push(employment.clone());
        Ok(employment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employment>, DomainError> {
        self.fail_if_requested()?;
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|e| e.id == id).cloned())
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Employment>, DomainError> {
        self.fail_if_requested()?;
        let records = self.records.lock().unwrap();
        let mut result: Vec<Employment> = records
            .iter()
            .filter(|e| e.employee_id == employee_id)
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
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|e| e.employee_id == employee_id).count() as u64)
    }

    async fn update(&self, employment: Employment) -> Result<Employment, DomainError> {
        self.fail_if_requested()?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|e| e.id == employment.id) {
            Some(existing) => {
                *existing = employment.clone();
                Ok(employment)
            }
            None => Err(DomainError::not_found("employment")),
        }
    }

    async fn end_all_except(
        &self,
        employee_id: Uuid,
        keep_id: Uuid,
        end_date: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        self.fail_if_requested()?;
        let mut records = self.records.lock().unwrap();
        let mut affected = 0;
        for record in records.iter_mut() {
            if record.employee_id == employee_id
                && record.id != keep_id
                && record.employment_status != EmploymentStatus::Ended
            {
                record.employment_status = EmploymentStatus::Ended;
                record.end_date = Some(end_date);
                record.updated_at = Some(Utc::now());
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.fail_if_requested()?;
        let mut records = self.records.lock().unwrap();
        let initial = records.len();
        records.retain(|e| e.id != id);
        Ok(records.len() < initial)
    }
}
