//! MySQL implementation of the AccessLogRepository trait.
//!
//! Rows are inserted by the redemption store; this repository serves the
//! read views and the write-once approval decision. The decision UPDATE is
//! conditional on the entry being undecided, mirroring the conditional
//! consume on verification codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::access_log::{AccessLog, ApprovalStatus};
use sl_core::errors::DomainError;
use sl_core::repositories::AccessLogRepository;

const LOG_COLUMNS: &str = r#"
    id, verification_code_id, employer_id, accessed_at, ip_address,
    user_agent, request_purpose, success, error_message, data_accessed,
    requires_approval, approval_status, approved_by, approved_at, created_at
"#;

/// MySQL implementation of AccessLogRepository
pub struct MySqlAccessLogRepository {
    pool: MySqlPool,
}

impl MySqlAccessLogRepository {
    /// Create a new MySQL access log repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Convert a database row to an AccessLog entity
fn row_to_log(row: &sqlx::mysql::MySqlRow) -> Result<AccessLog, DomainError> {
    let id: String = row.try_get("id").map_err(|e| internal("Failed to get id", e))?;
    let verification_code_id: Option<String> = row
        .try_get("verification_code_id")
        .map_err(|e| internal("Failed to get verification_code_id", e))?;
    let employer_id: String = row
        .try_get("employer_id")
        .map_err(|e| internal("Failed to get employer_id", e))?;
    let approved_by: Option<String> = row
        .try_get("approved_by")
        .map_err(|e| internal("Failed to get approved_by", e))?;
    let approval_status: Option<String> = row
        .try_get("approval_status")
        .map_err(|e| internal("Failed to get approval_status", e))?;
    let data_accessed: Option<JsonValue> = row
        .try_get("data_accessed")
        .map_err(|e| internal("Failed to get data_accessed", e))?;

    Ok(AccessLog {
        id: Uuid::parse_str(&id).map_err(|e| internal("Invalid log UUID", e))?,
        verification_code_id: verification_code_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| internal("Invalid code UUID", e))?,
        employer_id: Uuid::parse_str(&employer_id)
            .map_err(|e| internal("Invalid employer UUID", e))?,
        accessed_at: row
            .try_get::<DateTime<Utc>, _>("accessed_at")
            .map_err(|e| internal("Failed to get accessed_at", e))?,
        ip_address: row
            .try_get("ip_address")
            .map_err(|e| internal("Failed to get ip_address", e))?,
        user_agent: row
            .try_get("user_agent")
            .map_err(|e| internal("Failed to get user_agent", e))?,
        request_purpose: row
            .try_get("request_purpose")
            .map_err(|e| internal("Failed to get request_purpose", e))?,
        success: row
            .try_get("success")
            .map_err(|e| internal("Failed to get success", e))?,
        error_message: row
            .try_get("error_message")
            .map_err(|e| internal("Failed to get error_message", e))?,
        data_accessed,
        requires_approval: row
            .try_get("requires_approval")
            .map_err(|e| internal("Failed to get requires_approval", e))?,
        approval_status: approval_status
            .as_deref()
            .map(|s| {
                ApprovalStatus::parse(s)
                    .ok_or_else(|| internal("Unknown approval status", s))
            })
            .transpose()?,
        approved_by: approved_by
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| internal("Invalid approver UUID", e))?,
        approved_at: row
            .try_get::<Option<DateTime<Utc>>, _>("approved_at")
            .map_err(|e| internal("Failed to get approved_at", e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| internal("Failed to get created_at", e))?,
    })
}

#[async_trait]
impl AccessLogRepository for MySqlAccessLogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessLog>, DomainError> {
        let query = format!("SELECT {} FROM access_logs WHERE id = ?", LOG_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find access log by id", e))?;
        row.as_ref().map(row_to_log).transpose()
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM access_logs al
            JOIN verification_codes vc ON al.verification_code_id = vc.id
            WHERE vc.employee_id = ?
            ORDER BY al.accessed_at DESC
            LIMIT ? OFFSET ?
            "#,
            qualified_columns()
        );

        let rows = sqlx::query(&query)
            .bind(employee_id.to_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list access logs by employee", e))?;

        rows.iter().map(row_to_log).collect()
    }

    async fn list_by_employer(
        &self,
        employer_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM access_logs
            WHERE employer_id = ?
            ORDER BY accessed_at DESC
            LIMIT ? OFFSET ?
            "#,
            LOG_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(employer_id.to_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list access logs by employer", e))?;

        rows.iter().map(row_to_log).collect()
    }

    async fn list_by_code(
        &self,
        verification_code_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM access_logs
            WHERE verification_code_id = ?
            ORDER BY accessed_at DESC
            LIMIT ? OFFSET ?
            "#,
            LOG_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(verification_code_id.to_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list access logs by code", e))?;

        rows.iter().map(row_to_log).collect()
    }

    async fn list_pending_approvals(
        &self,
        employee_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AccessLog>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM access_logs al
            JOIN verification_codes vc ON al.verification_code_id = vc.id
            WHERE vc.employee_id = ?
              AND al.requires_approval = TRUE
              AND al.approval_status = 'pending'
            ORDER BY al.accessed_at DESC
            LIMIT ? OFFSET ?
            "#,
            qualified_columns()
        );

        let rows = sqlx::query(&query)
            .bind(employee_id.to_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list pending approvals", e))?;

        rows.iter().map(row_to_log).collect()
    }

    async fn decide(
        &self,
        log_id: Uuid,
        decision: ApprovalStatus,
        approver_id: Uuid,
        decided_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE access_logs
            SET approval_status = ?, approved_by = ?, approved_at = ?
            WHERE id = ?
              AND (approval_status IS NULL OR approval_status = 'pending')
        "#;

        let result = sqlx::query(query)
            .bind(decision.as_str())
            .bind(approver_id.to_string())
            .bind(decided_at)
            .bind(log_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to record approval decision", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_employee(
        &self,
        employee_id: Uuid,
        success: Option<bool>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, DomainError> {
        let mut query = String::from(
            r#"
            SELECT COUNT(*) as count
            FROM access_logs al
            JOIN verification_codes vc ON al.verification_code_id = vc.id
            WHERE vc.employee_id = ?
            "#,
        );
        if success.is_some() {
            query.push_str(" AND al.success = ?");
        }
        if since.is_some() {
            query.push_str(" AND al.accessed_at >= ?");
        }

        let mut builder = sqlx::query(&query).bind(employee_id.to_string());
        if let Some(success) = success {
            builder = builder.bind(success);
        }
        if let Some(since) = since {
            builder = builder.bind(since);
        }

        let row = builder
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count access logs by employee", e))?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| internal("Failed to get count", e))?;
        Ok(count as u64)
    }

    async fn count_by_employer(
        &self,
        employer_id: Uuid,
        success: Option<bool>,
        since: Option<DateTime<Utc>>,
    ) -> Result<u64, DomainError> {
        let mut query =
            String::from("SELECT COUNT(*) as count FROM access_logs WHERE employer_id = ?");
        if success.is_some() {
            query.push_str(" AND success = ?");
        }
        if since.is_some() {
            query.push_str(" AND accessed_at >= ?");
        }

        let mut builder = sqlx::query(&query).bind(employer_id.to_string());
        if let Some(success) = success {
            builder = builder.bind(success);
        }
        if let Some(since) = since {
            builder = builder.bind(since);
        }

        let row = builder
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count access logs by employer", e))?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| internal("Failed to get count", e))?;
        Ok(count as u64)
    }
}

/// The log columns qualified with the `al` alias for joined queries
fn qualified_columns() -> String {
    LOG_COLUMNS
        .split(',')
        .map(|c| format!("al.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
