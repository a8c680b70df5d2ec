//! MySQL implementation of the RedemptionStore trait.
//!
//! One redemption attempt is one transaction: the code mutation (if any)
//! and the audit log row commit together. The usage increment is a
//! conditional UPDATE whose `rows_affected` decides the race; when it
//! applies to no row the transaction is rolled back and the engine records
//! a rejection instead.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use sl_core::domain::entities::access_log::AccessLog;
use sl_core::errors::DomainError;
use sl_core::repositories::{CodeMutation, RedemptionRecord, RedemptionStore};

use super::employment_repository_impl::row_to_employment;
use super::user_repository_impl::row_to_user;
use super::verification_code_repository_impl::{row_to_code, CODE_COLUMNS};

/// MySQL implementation of RedemptionStore
pub struct MySqlRedemptionStore {
    pool: MySqlPool,
}

impl MySqlRedemptionStore {
    /// Create a new MySQL redemption store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

#[async_trait]
impl RedemptionStore for MySqlRedemptionStore {
    async fn load_for_redemption(
        &self,
        code: &str,
    ) -> Result<Option<RedemptionRecord>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_codes WHERE code = ?",
            CODE_COLUMNS
        );
        let Some(code_row) = sqlx::query(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to load verification code", e))?
        else {
            return Ok(None);
        };
        let code = row_to_code(&code_row)?;

        let employment_row = sqlx::query(
            r#"
            SELECT id, employee_id, company_name, company_website, company_location,
                   job_title, department, employment_type, employment_status,
                   start_date, end_date, salary_range, benefits, job_description,
                   manager_name, manager_email, is_verified, verification_method,
                   verification_date, created_at, updated_at
            FROM employments WHERE id = ?
            "#,
        )
        .bind(code.employment_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| internal("Failed to load employment for code", e))?;
        let employment = row_to_employment(&employment_row)?;

        let employee_row = sqlx::query(
            r#"
            SELECT id, email, hashed_password, full_name, user_type, public_id,
                   employer_number, company_handle, is_active, is_verified,
                   phone_number, location, bio, company_name, company_website,
                   company_size, created_at, updated_at, last_login_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(code.employee_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| internal("Failed to load employee for code", e))?;
        let employee = row_to_user(&employee_row)?;

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
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| internal("Failed to begin redemption transaction", e))?;

        match mutation {
            CodeMutation::None => {}
            CodeMutation::MarkExpired { code_id } => {
                // Monotonic flip; racing attempts all landing here is fine
                sqlx::query(
                    r#"
                    UPDATE verification_codes
                    SET status = 'expired', updated_at = ?
                    WHERE id = ? AND status = 'active'
                    "#,
                )
                .bind(Utc::now())
                .bind(code_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| internal("Failed to mark code expired", e))?;
            }
            CodeMutation::Consume { code_id, now } => {
                // status is assigned before the counter so the IF sees the
                // pre-increment value (MySQL applies SET left to right)
                let result = sqlx::query(
                    r#"
                    UPDATE verification_codes
                    SET status = IF(current_usage_count + 1 >= max_usage_count, 'used', status),
                        current_usage_count = current_usage_count + 1,
                        last_used_at = ?,
                        updated_at = ?
                    WHERE id = ? AND status = 'active'
                      AND current_usage_count < max_usage_count
                    "#,
                )
                .bind(now)
                .bind(Utc::now())
                .bind(code_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| internal("Failed to consume verification code", e))?;

                if result.rows_affected() == 0 {
                    tx.rollback()
                        .await
                        .map_err(|e| internal("Failed to roll back lost consume race", e))?;
                    return Ok(false);
                }
            }
        }

        insert_access_log(&mut tx, log).await?;

        tx.commit()
            .await
            .map_err(|e| internal("Failed to commit redemption attempt", e))?;
        Ok(true)
    }
}

async fn insert_access_log(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    log: &AccessLog,
) -> Result<(), DomainError> {
    let data_accessed_json = log
        .data_accessed
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| internal("Failed to serialize data_accessed", e))?;

    sqlx::query(
        r#"
        INSERT INTO access_logs (
            id, verification_code_id, employer_id, accessed_at, ip_address,
            user_agent, request_purpose, success, error_message, data_accessed,
            requires_approval, approval_status, approved_by, approved_at,
            created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(log.id.to_string())
    .bind(log.verification_code_id.map(|id| id.to_string()))
    .bind(log.employer_id.to_string())
    .bind(log.accessed_at)
    .bind(&log.ip_address)
    .bind(&log.user_agent)
    .bind(&log.request_purpose)
    .bind(log.success)
    .bind(&log.error_message)
    .bind(data_accessed_json)
    .bind(log.requires_approval)
    .bind(log.approval_status.map(|s| s.as_str()))
    .bind(log.approved_by.map(|id: Uuid| id.to_string()))
    .bind(log.approved_at)
    .bind(log.created_at)
    .execute(&mut **tx)
    .await
    .map_err(|e| internal("Failed to append access log", e))?;

    Ok(())
}
