//! MySQL implementation of the EmploymentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::employment::{Employment, EmploymentStatus, EmploymentType};
use sl_core::errors::DomainError;
use sl_core::repositories::EmploymentRepository;

const EMPLOYMENT_COLUMNS: &str = r#"
    id, employee_id, company_name, company_website, company_location,
    job_title, department, employment_type, employment_status, start_date,
    end_date, salary_range, benefits, job_description, manager_name,
    manager_email, is_verified, verification_method, verification_date,
    created_at, updated_at
"#;

/// MySQL implementation of EmploymentRepository
pub struct MySqlEmploymentRepository {
    pool: MySqlPool,
}

impl MySqlEmploymentRepository {
    /// Create a new MySQL employment repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Convert a database row to an Employment entity
pub(crate) fn row_to_employment(row: &sqlx::mysql::MySqlRow) -> Result<Employment, DomainError> {
    let id: String = row.try_get("id").map_err(|e| internal("Failed to get id", e))?;
    let employee_id: String = row
        .try_get("employee_id")
        .map_err(|e| internal("Failed to get employee_id", e))?;

    let employment_type_str: String = row
        .try_get("employment_type")
        .map_err(|e| internal("Failed to get employment_type", e))?;
    let employment_type = EmploymentType::parse(&employment_type_str)
        .ok_or_else(|| internal("Unknown employment type", &employment_type_str))?;

    let employment_status_str: String = row
        .try_get("employment_status")
        .map_err(|e| internal("Failed to get employment_status", e))?;
    let employment_status = EmploymentStatus::parse(&employment_status_str)
        .ok_or_else(|| internal("Unknown employment status", &employment_status_str))?;

    Ok(Employment {
        id: Uuid::parse_str(&id).map_err(|e| internal("Invalid employment UUID", e))?,
        employee_id: Uuid::parse_str(&employee_id)
            .map_err(|e| internal("Invalid employee UUID", e))?,
        company_name: row
            .try_get("company_name")
            .map_err(|e| internal("Failed to get company_name", e))?,
        company_website: row
            .try_get("company_website")
            .map_err(|e| internal("Failed to get company_website", e))?,
        company_location: row
            .try_get("company_location")
            .map_err(|e| internal("Failed to get company_location", e))?,
        job_title: row
            .try_get("job_title")
            .map_err(|e| internal("Failed to get job_title", e))?,
        department: row
            .try_get("department")
            .map_err(|e| internal("Failed to get department", e))?,
        employment_type,
        employment_status,
        start_date: row
            .try_get::<DateTime<Utc>, _>("start_date")
            .map_err(|e| internal("Failed to get start_date", e))?,
        end_date: row
            .try_get::<Option<DateTime<Utc>>, _>("end_date")
            .map_err(|e| internal("Failed to get end_date", e))?,
        salary_range: row
            .try_get("salary_range")
            .map_err(|e| internal("Failed to get salary_range", e))?,
        benefits: row
            .try_get("benefits")
            .map_err(|e| internal("Failed to get benefits", e))?,
        job_description: row
            .try_get("job_description")
            .map_err(|e| internal("Failed to get job_description", e))?,
        manager_name: row
            .try_get("manager_name")
            .map_err(|e| internal("Failed to get manager_name", e))?,
        manager_email: row
            .try_get("manager_email")
            .map_err(|e| internal("Failed to get manager_email", e))?,
        is_verified: row
            .try_get("is_verified")
            .map_err(|e| internal("Failed to get is_verified", e))?,
        verification_method: row
            .try_get("verification_method")
            .map_err(|e| internal("Failed to get verification_method", e))?,
        verification_date: row
            .try_get::<Option<DateTime<Utc>>, _>("verification_date")
            .map_err(|e| internal("Failed to get verification_date", e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| internal("Failed to get created_at", e))?,
        updated_at: row
            .try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(|e| internal("Failed to get updated_at", e))?,
    })
}

#[async_trait]
impl EmploymentRepository for MySqlEmploymentRepository {
    async fn create(&self, employment: Employment) -> Result<Employment, DomainError> {
        let query = r#"
            INSERT INTO employments (
                id, employee_id, company_name, company_website, company_location,
                job_title, department, employment_type, employment_status,
                start_date, end_date, salary_range, benefits, job_description,
                manager_name, manager_email, is_verified, verification_method,
                verification_date, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(employment.id.to_string())
            .bind(employment.employee_id.to_string())
            .bind(&employment.company_name)
            .bind(&employment.company_website)
            .bind(&employment.company_location)
            .bind(&employment.job_title)
            .bind(&employment.department)
            .bind(employment.employment_type.as_str())
            .bind(employment.employment_status.as_str())
            .bind(employment.start_date)
            .bind(employment.end_date)
            .bind(&employment.salary_range)
            .bind(&employment.benefits)
            .bind(&employment.job_description)
            .bind(&employment.manager_name)
            .bind(&employment.manager_email)
            .bind(employment.is_verified)
            .bind(&employment.verification_method)
            .bind(employment.verification_date)
            .bind(employment.created_at)
            .bind(employment.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to create employment", e))?;

        Ok(employment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employment>, DomainError> {
        let query = format!("SELECT {} FROM employments WHERE id = ?", EMPLOYMENT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find employment by id", e))?;
        row.as_ref().map(row_to_employment).transpose()
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Employment>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM employments
            WHERE employee_id = ?
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
            EMPLOYMENT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(employee_id.to_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list employments", e))?;

        rows.iter().map(row_to_employment).collect()
    }

    async fn count_by_employee(&self, employee_id: Uuid) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM employments WHERE employee_id = ?")
            .bind(employee_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count employments", e))?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| internal("Failed to get count", e))?;
        Ok(count as u64)
    }

    async fn update(&self, employment: Employment) -> Result<Employment, DomainError> {
        let query = r#"
            UPDATE employments
            SET company_name = ?, company_website = ?, company_location = ?,
                job_title = ?, department = ?, employment_type = ?,
                employment_status = ?, start_date = ?, end_date = ?,
                salary_range = ?, benefits = ?, job_description = ?,
                manager_name = ?, manager_email = ?, is_verified = ?,
                verification_method = ?, verification_date = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&employment.company_name)
            .bind(&employment.company_website)
            .bind(&employment.company_location)
            .bind(&employment.job_title)
            .bind(&employment.department)
            .bind(employment.employment_type.as_str())
            .bind(employment.employment_status.as_str())
            .bind(employment.start_date)
            .bind(employment.end_date)
            .bind(&employment.salary_range)
            .bind(&employment.benefits)
            .bind(&employment.job_description)
            .bind(&employment.manager_name)
            .bind(&employment.manager_email)
            .bind(employment.is_verified)
            .bind(&employment.verification_method)
            .bind(employment.verification_date)
            .bind(Utc::now())
            .bind(employment.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to update employment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("employment"));
        }
        Ok(employment)
    }

    async fn end_all_except(
        &self,
        employee_id: Uuid,
        keep_id: Uuid,
        end_date: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE employments
            SET employment_status = 'ended', end_date = ?, updated_at = ?
            WHERE employee_id = ? AND id != ? AND employment_status != 'ended'
        "#;

        let result = sqlx::query(query)
            .bind(end_date)
            .bind(Utc::now())
            .bind(employee_id.to_string())
            .bind(keep_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to end other employments", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM employments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete employment", e))?;
        Ok(result.rows_affected() > 0)
    }
}
