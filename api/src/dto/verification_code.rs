//! Verification code request DTOs.
//!
//! The redemption response is the core `VerificationOutcome` serialized
//! as-is: business-rule rejections travel as 200 responses with
//! `success = false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sl_core::services::verification::CreateCodeInput;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCodeRequest {
    pub employment_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub purpose: String,

    #[serde(default = "default_max_usage_count")]
    #[validate(range(min = 1))]
    pub max_usage_count: i32,

    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub require_approval: bool,

    #[validate(length(max = 512))]
    pub allowed_domains: Option<String>,
}

impl From<CreateCodeRequest> for CreateCodeInput {
    fn from(request: CreateCodeRequest) -> Self {
        Self {
            employment_id: request.employment_id,
            purpose: request.purpose,
            max_usage_count: request.max_usage_count,
            expires_at: request.expires_at,
            require_approval: request.require_approval,
            allowed_domains: request.allowed_domains,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, max = 32))]
    pub code: String,

    #[validate(length(max = 255))]
    pub purpose: Option<String>,
}

fn default_max_usage_count() -> i32 {
    1
}
