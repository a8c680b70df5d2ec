//! Outcome types for verification code redemption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::employment::Employment;
use crate::domain::entities::user::User;

/// Caller-supplied context recorded with every redemption attempt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Caller IP address
    pub ip_address: Option<String>,

    /// Caller user agent
    pub user_agent: Option<String>,

    /// Purpose stated by the caller
    pub purpose: Option<String>,
}

impl RequestMetadata {
    /// Create metadata with all fields set
    pub fn new(
        ip_address: Option<String>,
        user_agent: Option<String>,
        purpose: Option<String>,
    ) -> Self {
        Self {
            ip_address,
            user_agent,
            purpose,
        }
    }
}

/// The bounded set of employment fields disclosed on successful redemption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisclosureSnapshot {
    /// Referenced employment record
    pub employment_id: Uuid,

    /// Company name
    pub company_name: String,

    /// Job title
    pub job_title: String,

    /// Contractual form
    pub employment_type: String,

    /// Current standing
    pub employment_status: String,

    /// Start of the employment
    pub start_date: DateTime<Utc>,

    /// End of the employment, if ended
    pub end_date: Option<DateTime<Utc>>,

    /// Department within the company
    pub department: Option<String>,

    /// Company location
    pub location: Option<String>,

    /// Whether the employment record itself is verified
    pub is_verified: bool,

    /// When the employment record was verified
    pub verification_date: Option<DateTime<Utc>>,
}

impl DisclosureSnapshot {
    /// Build the snapshot from an employment record
    pub fn from_employment(employment: &Employment) -> Self {
        Self {
            employment_id: employment.id,
            company_name: employment.company_name.clone(),
            job_title: employment.job_title.clone(),
            employment_type: employment.employment_type.as_str().to_string(),
            employment_status: employment.employment_status.as_str().to_string(),
            start_date: employment.start_date,
            end_date: employment.end_date,
            department: employment.department.clone(),
            location: employment.company_location.clone(),
            is_verified: employment.is_verified,
            verification_date: employment.verification_date,
        }
    }
}

/// Result of a redemption attempt
///
/// Business-rule rejections are ordinary values (`success == false`), never
/// errors: the attempt is always logged and always answered with a normal
/// response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the redemption succeeded
    pub success: bool,

    /// Human-readable result message
    pub message: String,

    /// Disclosed data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DisclosureSnapshot>,

    /// Employee display name (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,

    /// Company name (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Job title (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    /// Employment standing (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,

    /// When this verification was performed (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<DateTime<Utc>>,
}

impl VerificationOutcome {
    /// Create a rejected outcome with the given message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            employee_name: None,
            company_name: None,
            job_title: None,
            employment_status: None,
            verification_date: None,
        }
    }

    /// Create a successful outcome carrying the disclosure snapshot
    pub fn accepted(snapshot: DisclosureSnapshot, employee: &User) -> Self {
        Self {
            success: true,
            message: "Employment verification successful".to_string(),
            employee_name: Some(employee.full_name.clone()),
            company_name: Some(snapshot.company_name.clone()),
            job_title: Some(snapshot.job_title.clone()),
            employment_status: Some(snapshot.employment_status.clone()),
            verification_date: Some(Utc::now()),
            data: Some(snapshot),
        }
    }
}
