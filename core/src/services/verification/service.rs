//! Main verification code lifecycle service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use sl_shared::config::VerificationConfig;
use sl_shared::types::Pagination;
use sl_shared::utils::validation::normalize_domain_list;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{EmploymentRepository, VerificationCodeRepository};

/// Input for creating a verification code
#[derive(Debug, Clone)]
pub struct CreateCodeInput {
    /// Employment record the code will disclose
    pub employment_id: Uuid,

    /// Human-readable purpose
    pub purpose: String,

    /// Maximum number of successful redemptions
    pub max_usage_count: i32,

    /// Expiry timestamp; the configured default lifetime applies when unset
    pub expires_at: Option<DateTime<Utc>>,

    /// Whether redemptions enter the approval workflow
    pub require_approval: bool,

    /// Comma-separated employer domain allow-list
    pub allowed_domains: Option<String>,
}

/// Service owning the verification code lifecycle outside of redemption
pub struct VerificationCodeService<V, E>
where
    V: VerificationCodeRepository,
    E: EmploymentRepository,
{
    code_repository: Arc<V>,
    employment_repository: Arc<E>,
    config: VerificationConfig,
}

impl<V, E> VerificationCodeService<V, E>
where
    V: VerificationCodeRepository,
    E: EmploymentRepository,
{
    /// Create a new verification code service
    pub fn new(
        code_repository: Arc<V>,
        employment_repository: Arc<E>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            code_repository,
            employment_repository,
            config,
        }
    }

    /// Create a new active verification code for one of the employee's own
    /// employment records
    ///
    /// The code string is generated as a candidate and inserted under the
    /// store's unique index; a collision triggers regeneration, bounded by
    /// the configured retry limit.
    pub async fn create_code(
        &self,
        employee_id: Uuid,
        input: CreateCodeInput,
    ) -> DomainResult<VerificationCode> {
        if input.max_usage_count < 1 {
            return Err(DomainError::ValidationErr(ValidationError::OutOfRange {
                field: "max_usage_count".to_string(),
                min: "1".to_string(),
                max: self.config.max_usage_count_limit.to_string(),
            }));
        }
        if input.max_usage_count > self.config.max_usage_count_limit as i32 {
            return Err(DomainError::ValidationErr(ValidationError::OutOfRange {
                field: "max_usage_count".to_string(),
                min: "1".to_string(),
                max: self.config.max_usage_count_limit.to_string(),
            }));
        }
        if input.purpose.trim().is_empty() {
            return Err(DomainError::ValidationErr(ValidationError::RequiredField {
                field: "purpose".to_string(),
            }));
        }

        let now = Utc::now();
        let expires_at = input
            .expires_at
            .unwrap_or_else(|| now + Duration::hours(self.config.code_expiry_hours));
        if expires_at <= now {
            return Err(DomainError::ValidationErr(ValidationError::InvalidDate {
                field: "expires_at".to_string(),
            }));
        }

        // The employment must exist and belong to the requesting employee;
        // a foreign record is reported as absent, not as forbidden
        let employment = self
            .employment_repository
            .find_by_id(input.employment_id)
            .await?
            .filter(|e| e.employee_id == employee_id)
            .ok_or_else(|| DomainError::not_found("employment"))?;

        let mut code = VerificationCode::new(
            employee_id,
            employment.id,
            input.purpose,
            input.max_usage_count,
            expires_at,
        );
        code.require_approval = input.require_approval;
        code.allowed_domains = input
            .allowed_domains
            .as_deref()
            .and_then(normalize_domain_list);

        for attempt in 0..self.config.max_generation_retries {
            match self.code_repository.create(code.clone()).await {
                Ok(created) => {
                    tracing::info!(
                        code_id = %created.id,
                        employee_id = %employee_id,
                        employment_id = %employment.id,
                        "Issued verification code"
                    );
                    return Ok(created);
                }
                Err(DomainError::Conflict { .. }) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        "Verification code candidate collided, regenerating"
                    );
                    code.regenerate_code();
                }
                Err(other) => return Err(other),
            }
        }

        Err(DomainError::internal(
            "Exhausted retries generating a unique verification code",
        ))
    }

    /// Revoke a code, enforcing ownership
    ///
    /// The status write is unconditional: revoking an expired or used code
    /// overwrites its status with `revoked`. Callers may treat the call as
    /// idempotent.
    pub async fn revoke_code(&self, code_id: Uuid, requester_id: Uuid) -> DomainResult<()> {
        let code = self
            .code_repository
            .find_by_id(code_id)
            .await?
            .ok_or_else(|| DomainError::not_found("verification code"))?;
        if code.employee_id != requester_id {
            return Err(DomainError::forbidden("Not enough permissions"));
        }

        self.code_repository.revoke(code.id).await?;
        tracing::info!(code_id = %code_id, "Revoked verification code");
        Ok(())
    }

    /// Transition every active code past its expiry to expired
    ///
    /// Returns the number of codes transitioned. Intended to run
    /// periodically; redemption also applies expiry lazily, so a missed
    /// sweep never extends a code's life.
    pub async fn expire_sweep(&self) -> DomainResult<u64> {
        let affected = self.code_repository.expire_sweep(Utc::now()).await?;
        if affected > 0 {
            tracing::info!(affected, "Expired verification codes past their deadline");
        }
        Ok(affected)
    }

    /// List codes issued by the employee
    pub async fn list_codes(
        &self,
        employee_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<VerificationCode>, u64)> {
        let codes = self
            .code_repository
            .list_by_employee(employee_id, pagination.offset_i64(), pagination.limit_i64())
            .await?;
        let total = self.code_repository.count_by_employee(employee_id).await?;
        Ok((codes, total))
    }

    /// Get one code, enforcing ownership
    pub async fn get_code(
        &self,
        code_id: Uuid,
        requester_id: Uuid,
    ) -> DomainResult<VerificationCode> {
        let code = self
            .code_repository
            .find_by_id(code_id)
            .await?
            .ok_or_else(|| DomainError::not_found("verification code"))?;
        if code.employee_id != requester_id {
            return Err(DomainError::forbidden("Not enough permissions"));
        }
        Ok(code)
    }
}
