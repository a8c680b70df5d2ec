//! Main redemption engine implementation

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::access_log::AccessLog;
use crate::domain::entities::verification_code::CodeStatus;
use crate::domain::value_objects::{DisclosureSnapshot, RequestMetadata, VerificationOutcome};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CodeMutation, RedemptionStore};

/// Redemption engine validating codes and recording every attempt
///
/// The decision chain is ordered; the first rejecting step wins and no later
/// step runs. Each branch commits exactly one audit row together with its
/// code mutation (if any) through the redemption store, so a crash cannot
/// leave a mutated code without its log row or vice versa.
pub struct RedemptionService<S: RedemptionStore> {
    store: Arc<S>,
}

impl<S: RedemptionStore> RedemptionService<S> {
    /// Create a new redemption engine
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Redeem a verification code on behalf of an employer
    ///
    /// Business-rule rejections come back as `success == false` outcomes,
    /// never as errors; only store faults raise `DomainError`. The caller
    /// must have verified that the requester is an employer.
    pub async fn verify_code(
        &self,
        code: &str,
        employer_id: Uuid,
        metadata: RequestMetadata,
    ) -> DomainResult<VerificationOutcome> {
        let now = Utc::now();

        // Step 1: lookup. Unknown codes are logged without a code reference.
        let Some(record) = self.store.load_for_redemption(code).await? else {
            tracing::warn!(employer_id = %employer_id, "Redemption of unknown code rejected");
            return self
                .reject(
                    None,
                    employer_id,
                    &metadata,
                    "Invalid verification code",
                    "Invalid verification code",
                )
                .await;
        };
        let code_id = record.code.id;

        // Step 2: status. Only active codes proceed.
        if record.code.status != CodeStatus::Active {
            let status = record.code.status;
            tracing::info!(
                code_id = %code_id,
                status = status.as_str(),
                "Redemption of non-active code rejected"
            );
            return self
                .reject(
                    Some(code_id),
                    employer_id,
                    &metadata,
                    format!("Code is {}", status),
                    format!("Verification code is {}", status),
                )
                .await;
        }

        // Step 3: expiry, applied lazily. The flip is monotonic, so racing
        // attempts all landing on expired is harmless.
        if record.code.is_expired_at(now) {
            let log = AccessLog::failure(Some(code_id), employer_id, "Code has expired")
                .with_request_context(
                    metadata.ip_address.clone(),
                    metadata.user_agent.clone(),
                    metadata.purpose.clone(),
                );
            self.store
                .commit_attempt(CodeMutation::MarkExpired { code_id }, &log)
                .await?;
            tracing::info!(code_id = %code_id, "Redemption of expired code rejected");
            return Ok(VerificationOutcome::rejected("Verification code has expired"));
        }

        // Step 4: usage allowance, pre-checked from the loaded row.
        if record.code.is_exhausted() {
            return self
                .reject(
                    Some(code_id),
                    employer_id,
                    &metadata,
                    "Code usage limit exceeded",
                    "Verification code usage limit exceeded",
                )
                .await;
        }

        // Step 5: accept. The consume is a conditional update; losing the
        // race against a concurrent attempt downgrades to the usage-limit
        // rejection with its own log row.
        let snapshot = DisclosureSnapshot::from_employment(&record.employment);
        let disclosed = serde_json::to_value(&snapshot)
            .map_err(|e| DomainError::internal(format!("Failed to serialize snapshot: {}", e)))?;

        let mut log = AccessLog::success(code_id, employer_id)
            .with_request_context(
                metadata.ip_address.clone(),
                metadata.user_agent.clone(),
                metadata.purpose.clone(),
            )
            .with_disclosed_data(disclosed);
        if record.code.require_approval {
            log = log.with_approval_required();
        }

        let applied = self
            .store
            .commit_attempt(CodeMutation::Consume { code_id, now }, &log)
            .await?;
        if !applied {
            tracing::warn!(
                code_id = %code_id,
                "Concurrent redemption consumed the last use, rejecting"
            );
            return self
                .reject(
                    Some(code_id),
                    employer_id,
                    &metadata,
                    "Code usage limit exceeded",
                    "Verification code usage limit exceeded",
                )
                .await;
        }

        tracing::info!(
            code_id = %code_id,
            employer_id = %employer_id,
            "Verification code redeemed"
        );
        Ok(VerificationOutcome::accepted(snapshot, &record.employee))
    }

    /// Commit a failure log row and build the rejection outcome
    async fn reject(
        &self,
        code_id: Option<Uuid>,
        employer_id: Uuid,
        metadata: &RequestMetadata,
        log_message: impl Into<String>,
        outcome_message: impl Into<String>,
    ) -> DomainResult<VerificationOutcome> {
        let log = AccessLog::failure(code_id, employer_id, log_message).with_request_context(
            metadata.ip_address.clone(),
            metadata.user_agent.clone(),
            metadata.purpose.clone(),
        );
        self.store.commit_attempt(CodeMutation::None, &log).await?;
        Ok(VerificationOutcome::rejected(outcome_message))
    }
}
