//! Main employment service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use sl_shared::types::Pagination;

use crate::domain::entities::employment::{Employment, EmploymentStatus, EmploymentType};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::EmploymentRepository;

/// Input for creating an employment record
#[derive(Debug, Clone)]
pub struct CreateEmploymentInput {
    pub company_name: String,
    pub job_title: String,
    pub employment_type: EmploymentType,
    pub start_date: DateTime<Utc>,
    pub company_website: Option<String>,
    pub company_location: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub benefits: Option<String>,
    pub job_description: Option<String>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
}

/// Input for updating an employment record; unset fields keep their value
#[derive(Debug, Clone, Default)]
pub struct UpdateEmploymentInput {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub employment_status: Option<EmploymentStatus>,
    pub end_date: Option<DateTime<Utc>>,
    pub company_website: Option<String>,
    pub company_location: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub job_description: Option<String>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
}

/// Service for employee-owned employment records
pub struct EmploymentService<E: EmploymentRepository> {
    employment_repository: Arc<E>,
}

impl<E: EmploymentRepository> EmploymentService<E> {
    /// Create a new employment service
    pub fn new(employment_repository: Arc<E>) -> Self {
        Self {
            employment_repository,
        }
    }

    /// Create an employment record owned by the employee
    pub async fn create(
        &self,
        employee_id: Uuid,
        input: CreateEmploymentInput,
    ) -> DomainResult<Employment> {
        let mut employment = Employment::new(
            employee_id,
            input.company_name,
            input.job_title,
            input.employment_type,
            input.start_date,
        );
        employment.company_website = input.company_website;
        employment.company_location = input.company_location;
        employment.department = input.department;
        employment.salary_range = input.salary_range;
        employment.benefits = input.benefits;
        employment.job_description = input.job_description;
        employment.manager_name = input.manager_name;
        employment.manager_email = input.manager_email;

        let employment = self.employment_repository.create(employment).await?;
        tracing::info!(
            employment_id = %employment.id,
            employee_id = %employee_id,
            "Created employment record"
        );
        Ok(employment)
    }

    /// List the employee's employment records
    pub async fn list(
        &self,
        employee_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Employment>, u64)> {
        let records = self
            .employment_repository
            .list_by_employee(employee_id, pagination.offset_i64(), pagination.limit_i64())
            .await?;
        let total = self
            .employment_repository
            .count_by_employee(employee_id)
            .await?;
        Ok((records, total))
    }

    /// Get one employment record, enforcing ownership
    pub async fn get(&self, employment_id: Uuid, requester_id: Uuid) -> DomainResult<Employment> {
        let employment = self.find_owned(employment_id, requester_id).await?;
        Ok(employment)
    }

    /// Update an employment record, enforcing ownership
    pub async fn update(
        &self,
        employment_id: Uuid,
        requester_id: Uuid,
        input: UpdateEmploymentInput,
    ) -> DomainResult<Employment> {
        let mut employment = self.find_owned(employment_id, requester_id).await?;

        if let Some(company_name) = input.company_name {
            employment.company_name = company_name;
        }
        if let Some(job_title) = input.job_title {
            employment.job_title = job_title;
        }
        if let Some(employment_type) = input.employment_type {
            employment.employment_type = employment_type;
        }
        if let Some(employment_status) = input.employment_status {
            employment.employment_status = employment_status;
        }
        if input.end_date.is_some() {
            employment.end_date = input.end_date;
        }
        if input.company_website.is_some() {
            employment.company_website = input.company_website;
        }
        if input.company_location.is_some() {
            employment.company_location = input.company_location;
        }
        if input.department.is_some() {
            employment.department = input.department;
        }
        if input.salary_range.is_some() {
            employment.salary_range = input.salary_range;
        }
        if input.job_description.is_some() {
            employment.job_description = input.job_description;
        }
        if input.manager_name.is_some() {
            employment.manager_name = input.manager_name;
        }
        if input.manager_email.is_some() {
            employment.manager_email = input.manager_email;
        }
        employment.updated_at = Some(Utc::now());

        self.employment_repository.update(employment).await
    }

    /// Delete an employment record, enforcing ownership
    pub async fn delete(&self, employment_id: Uuid, requester_id: Uuid) -> DomainResult<()> {
        let employment = self.find_owned(employment_id, requester_id).await?;
        self.employment_repository.delete(employment.id).await?;
        tracing::info!(employment_id = %employment_id, "Deleted employment record");
        Ok(())
    }

    /// Promote one record to the current employment, ending all others
    pub async fn set_as_current(
        &self,
        employment_id: Uuid,
        requester_id: Uuid,
    ) -> DomainResult<Employment> {
        let mut employment = self.find_owned(employment_id, requester_id).await?;

        self.employment_repository
            .end_all_except(requester_id, employment.id, Utc::now())
            .await?;

        employment.set_current();
        self.employment_repository.update(employment).await
    }

    /// Mark an employment as ended
    pub async fn end_employment(
        &self,
        employment_id: Uuid,
        requester_id: Uuid,
        end_date: Option<DateTime<Utc>>,
    ) -> DomainResult<Employment> {
        let mut employment = self.find_owned(employment_id, requester_id).await?;
        employment.end(end_date.unwrap_or_else(Utc::now));
        self.employment_repository.update(employment).await
    }

    async fn find_owned(&self, employment_id: Uuid, requester_id: Uuid) -> DomainResult<Employment> {
        let employment = self
            .employment_repository
            .find_by_id(employment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("employment"))?;
        if employment.employee_id != requester_id {
            return Err(DomainError::forbidden("Not enough permissions"));
        }
        Ok(employment)
    }
}
