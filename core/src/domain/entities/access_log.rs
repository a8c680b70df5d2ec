//! Access log entity recording every redemption attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Approval workflow state of a logged redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Denied,
}

impl ApprovalStatus {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "denied" => Some(Self::Denied),
            _ => None,
        }
    }

    /// Checks whether the workflow has reached a decision
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Represents one redemption attempt against a verification code
///
/// Rows are written exactly once per attempt and never updated afterwards,
/// with the sole exception of the approval workflow fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLog {
    /// Unique identifier for the log entry
    pub id: Uuid,

    /// Redeemed code, if the presented string matched a known code
    pub verification_code_id: Option<Uuid>,

    /// Requesting employer
    pub employer_id: Uuid,

    /// When the attempt happened
    pub accessed_at: DateTime<Utc>,

    /// Caller IP address
    pub ip_address: Option<String>,

    /// Caller user agent
    pub user_agent: Option<String>,

    /// Purpose stated by the caller
    pub request_purpose: Option<String>,

    /// Whether the redemption succeeded
    pub success: bool,

    /// Failure reason for rejected attempts
    pub error_message: Option<String>,

    /// Snapshot of the data actually disclosed, as JSON
    pub data_accessed: Option<JsonValue>,

    /// Whether the attempt entered the approval workflow
    pub requires_approval: bool,

    /// Approval workflow state
    pub approval_status: Option<ApprovalStatus>,

    /// Employee who decided the approval
    pub approved_by: Option<Uuid>,

    /// When the approval was decided
    pub approved_at: Option<DateTime<Utc>>,

    /// Timestamp when the row was created
    pub created_at: DateTime<Utc>,
}

impl AccessLog {
    /// Create a log entry for a successful redemption
    pub fn success(verification_code_id: Uuid, employer_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            verification_code_id: Some(verification_code_id),
            employer_id,
            accessed_at: now,
            ip_address: None,
            user_agent: None,
            request_purpose: None,
            success: true,
            error_message: None,
            data_accessed: None,
            requires_approval: false,
            approval_status: None,
            approved_by: None,
            approved_at: None,
            created_at: now,
        }
    }

    /// Create a log entry for a rejected redemption
    ///
    /// `verification_code_id` is `None` when the presented string matched no
    /// known code.
    pub fn failure(
        verification_code_id: Option<Uuid>,
        employer_id: Uuid,
        error_message: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            verification_code_id,
            employer_id,
            accessed_at: now,
            ip_address: None,
            user_agent: None,
            request_purpose: None,
            success: false,
            error_message: Some(error_message.into()),
            data_accessed: None,
            requires_approval: false,
            approval_status: None,
            approved_by: None,
            approved_at: None,
            created_at: now,
        }
    }

    /// Add caller request context
    pub fn with_request_context(
        mut self,
        ip_address: Option<String>,
        user_agent: Option<String>,
        request_purpose: Option<String>,
    ) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self.request_purpose = request_purpose;
        self
    }

    /// Attach the disclosed data snapshot
    pub fn with_disclosed_data(mut self, data: JsonValue) -> Self {
        self.data_accessed = Some(data);
        self
    }

    /// Route the attempt through the approval workflow
    pub fn with_approval_required(mut self) -> Self {
        self.requires_approval = true;
        self.approval_status = Some(ApprovalStatus::Pending);
        self
    }

    /// Checks whether the approval decision is still open
    pub fn is_approval_pending(&self) -> bool {
        self.requires_approval
            && matches!(self.approval_status, None | Some(ApprovalStatus::Pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_log() {
        let code_id = Uuid::new_v4();
        let employer_id = Uuid::new_v4();
        let log = AccessLog::success(code_id, employer_id)
            .with_disclosed_data(json!({"company_name": "Acme"}));

        assert!(log.success);
        assert_eq!(log.verification_code_id, Some(code_id));
        assert_eq!(log.employer_id, employer_id);
        assert!(log.error_message.is_none());
        assert_eq!(log.data_accessed.unwrap()["company_name"], "Acme");
    }

    #[test]
    fn test_failure_log_without_code_reference() {
        let log = AccessLog::failure(None, Uuid::new_v4(), "Invalid verification code");
        assert!(!log.success);
        assert!(log.verification_code_id.is_none());
        assert_eq!(
            log.error_message.as_deref(),
            Some("Invalid verification code")
        );
        assert!(log.data_accessed.is_none());
    }

    #[test]
    fn test_request_context() {
        let log = AccessLog::failure(None, Uuid::new_v4(), "Code has expired")
            .with_request_context(
                Some("203.0.113.7".to_string()),
                Some("curl/8.0".to_string()),
                Some("Background check".to_string()),
            );
        assert_eq!(log.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(log.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(log.request_purpose.as_deref(), Some("Background check"));
    }

    #[test]
    fn test_approval_workflow_entry() {
        let log = AccessLog::success(Uuid::new_v4(), Uuid::new_v4()).with_approval_required();
        assert!(log.requires_approval);
        assert_eq!(log.approval_status, Some(ApprovalStatus::Pending));
        assert!(log.is_approval_pending());
    }

    #[test]
    fn test_approval_status_roundtrip() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Denied,
        ] {
            assert_eq!(ApprovalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApprovalStatus::parse("rejected"), None);
        assert!(!ApprovalStatus::Pending.is_decided());
        assert!(ApprovalStatus::Denied.is_decided());
    }
}
