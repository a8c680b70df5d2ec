//! Redemption store trait.
//!
//! Redemption needs cross-aggregate atomicity that the per-entity
//! repositories cannot offer: the attempt's code mutation and its audit log
//! row must commit together, and the usage-count increment must be applied
//! conditionally so concurrent attempts cannot overshoot the allowance.
//! This trait is that seam; the engine drives the decision chain and hands
//! the store one mutation plus one log row per attempt.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::access_log::AccessLog;
use crate::domain::entities::employment::Employment;
use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Everything the redemption engine needs to evaluate one attempt
#[derive(Debug, Clone)]
pub struct RedemptionRecord {
    /// The matched verification code
    pub code: VerificationCode,

    /// The employment record the code discloses
    pub employment: Employment,

    /// The employee who issued the code
    pub employee: User,
}

/// The single code mutation an attempt may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMutation {
    /// Rejection without state change (unknown code, terminal status,
    /// exhausted allowance)
    None,

    /// Lazy expiry flip; monotonic, so last-write-wins is acceptable
    MarkExpired { code_id: Uuid },

    /// Conditional usage increment; only applies while the code is active
    /// and the allowance is not consumed, flipping the status to used when
    /// the increment reaches the maximum
    Consume {
        code_id: Uuid,
        now: DateTime<Utc>,
    },
}

/// Store seam executing one redemption attempt atomically
#[async_trait]
pub trait RedemptionStore: Send + Sync {
    /// Load the code with its employment and employee for the given code
    /// string
    ///
    /// # Returns
    /// * `Ok(Some(record))` - The string matched a known code
    /// * `Ok(None)` - No such code exists
    async fn load_for_redemption(
        &self,
        code: &str,
    ) -> Result<Option<RedemptionRecord>, DomainError>;

    /// Commit one attempt: apply the mutation and append the audit row in a
    /// single transaction
    ///
    /// # Returns
    /// * `Ok(true)` - The mutation applied (always true for `None` and
    ///   `MarkExpired`)
    /// * `Ok(false)` - A `Consume` mutation found no eligible row: a
    ///   concurrent attempt won the race. Nothing was written; the caller
    ///   must commit a rejection attempt instead.
    async fn commit_attempt(
        &self,
        mutation: CodeMutation,
        log: &AccessLog,
    ) -> Result<bool, DomainError>;
}
