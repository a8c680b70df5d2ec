//! MySQL implementation of the VerificationCodeRepository trait.
//!
//! The `verification_codes.code` column carries a unique index; `create`
//! maps a duplicate-key failure to `DomainError::Conflict` so the lifecycle
//! service can retry with a fresh candidate. Status transitions go through
//! conditional updates so they stay monotonic under concurrency.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::verification_code::{CodeStatus, VerificationCode};
use sl_core::errors::DomainError;
use sl_core::repositories::VerificationCodeRepository;

pub(crate) const CODE_COLUMNS: &str = r#"
    id, code, employee_id, employment_id, purpose, status, max_usage_count,
    current_usage_count, expires_at, require_approval, allowed_domains,
    created_at, updated_at, last_used_at
"#;

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Convert a database row to a VerificationCode entity
pub(crate) fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
    let id: String = row.try_get("id").map_err(|e| internal("Failed to get id", e))?;
    let employee_id: String = row
        .try_get("employee_id")
        .map_err(|e| internal("Failed to get employee_id", e))?;
    let employment_id: String = row
        .try_get("employment_id")
        .map_err(|e| internal("Failed to get employment_id", e))?;

    let status_str: String = row
        .try_get("status")
        .map_err(|e| internal("Failed to get status", e))?;
    let status =
        CodeStatus::parse(&status_str).ok_or_else(|| internal("Unknown code status", &status_str))?;

    Ok(VerificationCode {
        id: Uuid::parse_str(&id).map_err(|e| internal("Invalid code UUID", e))?,
        code: row
            .try_get("code")
            .map_err(|e| internal("Failed to get code", e))?,
        employee_id: Uuid::parse_str(&employee_id)
            .map_err(|e| internal("Invalid employee UUID", e))?,
        employment_id: Uuid::parse_str(&employment_id)
            .map_err(|e| internal("Invalid employment UUID", e))?,
        purpose: row
            .try_get("purpose")
            .map_err(|e| internal("Failed to get purpose", e))?,
        status,
        max_usage_count: row
            .try_get("max_usage_count")
            .map_err(|e| internal("Failed to get max_usage_count", e))?,
        current_usage_count: row
            .try_get("current_usage_count")
            .map_err(|e| internal("Failed to get current_usage_count", e))?,
        expires_at: row
            .try_get::<DateTime<Utc>, _>("expires_at")
            .map_err(|e| internal("Failed to get expires_at", e))?,
        require_approval: row
            .try_get("require_approval")
            .map_err(|e| internal("Failed to get require_approval", e))?,
        allowed_domains: row
            .try_get("allowed_domains")
            .map_err(|e| internal("Failed to get allowed_domains", e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| internal("Failed to get created_at", e))?,
        updated_at: row
            .try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(|e| internal("Failed to get updated_at", e))?,
        last_used_at: row
            .try_get::<Option<DateTime<Utc>>, _>("last_used_at")
            .map_err(|e| internal("Failed to get last_used_at", e))?,
    })
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let query = r#"
            INSERT INTO verification_codes (
                id, code, employee_id, employment_id, purpose, status,
                max_usage_count, current_usage_count, expires_at,
                require_approval, allowed_domains, created_at, updated_at,
                last_used_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(&code.code)
            .bind(code.employee_id.to_string())
            .bind(code.employment_id.to_string())
            .bind(&code.purpose)
            .bind(code.status.as_str())
            .bind(code.max_usage_count)
            .bind(code.current_usage_count)
            .bind(code.expires_at)
            .bind(code.require_approval)
            .bind(&code.allowed_domains)
            .bind(code.created_at)
            .bind(code.updated_at)
            .bind(code.last_used_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .map_or(false, |db| db.is_unique_violation())
                {
                    DomainError::Conflict {
                        resource: format!("verification code {}", code.code),
                    }
                } else {
                    internal("Failed to create verification code", e)
                }
            })?;

        Ok(code)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!("SELECT {} FROM verification_codes WHERE id = ?", CODE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find verification code by id", e))?;
        row.as_ref().map(row_to_code).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<VerificationCode>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_codes WHERE code = ?",
            CODE_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find verification code", e))?;
        row.as_ref().map(row_to_code).transpose()
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<VerificationCode>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM verification_codes
            WHERE employee_id = ?
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
            CODE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(employee_id.to_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list verification codes", e))?;

        rows.iter().map(row_to_code).collect()
    }

    async fn count_by_employee(&self, employee_id: Uuid) -> Result<u64, DomainError> {
        let row =
            sqlx::query("SELECT COUNT(*) as count FROM verification_codes WHERE employee_id = ?")
                .bind(employee_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| internal("Failed to count verification codes", e))?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| internal("Failed to get count", e))?;
        Ok(count as u64)
    }

    async fn revoke(&self, id: Uuid) -> Result<(), DomainError> {
        // Unconditional overwrite: the tombstone applies to terminal codes too
        sqlx::query("UPDATE verification_codes SET status = 'revoked', updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to revoke verification code", e))?;
        Ok(())
    }

    async fn expire_sweep(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE verification_codes
            SET status = 'expired', updated_at = ?
            WHERE status = 'active' AND expires_at <= ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to sweep expired codes", e))?;

        Ok(result.rows_affected())
    }
}
