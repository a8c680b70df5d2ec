//! Verification code lifecycle configuration

use serde::{Deserialize, Serialize};

/// Configuration for verification code creation and redemption
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Default code lifetime in hours, used when a request omits `expires_at`
    pub code_expiry_hours: i64,

    /// Maximum attempts to generate a globally unique code string before
    /// giving up with an internal error
    pub max_generation_retries: u32,

    /// Upper bound accepted for `max_usage_count` on a single code
    pub max_usage_count_limit: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiry_hours: 24,
            max_generation_retries: 5,
            max_usage_count_limit: 100,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(hours) = std::env::var("VERIFICATION_CODE_EXPIRY_HOURS") {
            if let Ok(hours) = hours.parse() {
                config.code_expiry_hours = hours;
            }
        }
        if let Ok(retries) = std::env::var("VERIFICATION_MAX_GENERATION_RETRIES") {
            if let Ok(retries) = retries.parse() {
                config.max_generation_retries = retries;
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_expiry_hours, 24);
        assert!(config.max_generation_retries >= 1);
    }
}
