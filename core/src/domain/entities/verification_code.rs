//! Verification code entity for employment verification.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of every verification code string
pub const CODE_PREFIX: &str = "SL";

/// Number of random segments in a code
pub const CODE_SEGMENTS: usize = 3;

/// Length of each random segment
pub const CODE_SEGMENT_LENGTH: usize = 4;

/// Alphabet used for the random segments
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

static CODE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^SL-[A-Z0-9]{4}-[A-Z0-9]{4}-[A-Z0-9]{4}$").expect("valid code format regex")
});

/// Lifecycle state of a verification code
///
/// `Active` is the only state a redemption can succeed from. The three
/// terminal states never transition back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStatus {
    Active,
    Expired,
    Revoked,
    Used,
}

impl CodeStatus {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::Used => "used",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            "revoked" => Some(Self::Revoked),
            "used" => Some(Self::Used),
            _ => None,
        }
    }

    /// Checks whether this state admits no further transitions except revoke
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl std::fmt::Display for CodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification code entity
///
/// A code references exactly one employment record of its issuing employee
/// and can be redeemed by employers until it expires, is revoked, or its
/// usage allowance runs out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the code record
    pub id: Uuid,

    /// Externally presented code string (format `SL-XXXX-XXXX-XXXX`)
    pub code: String,

    /// Issuing employee
    pub employee_id: Uuid,

    /// Referenced employment record
    pub employment_id: Uuid,

    /// Human-readable purpose (e.g. "Job application at Acme")
    pub purpose: String,

    /// Lifecycle state
    pub status: CodeStatus,

    /// Maximum number of successful redemptions
    pub max_usage_count: i32,

    /// Redemptions performed so far
    pub current_usage_count: i32,

    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,

    /// Whether successful redemptions enter the approval workflow
    pub require_approval: bool,

    /// Comma-separated list of employer domains allowed to redeem
    pub allowed_domains: Option<String>,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code was last updated
    pub updated_at: Option<DateTime<Utc>>,

    /// Timestamp of the last successful redemption
    pub last_used_at: Option<DateTime<Utc>>,
}

impl VerificationCode {
    /// Creates a new active verification code with a freshly generated
    /// code string
    ///
    /// The generated string is a candidate only: global uniqueness is
    /// enforced by the store at insert time.
    pub fn new(
        employee_id: Uuid,
        employment_id: Uuid,
        purpose: String,
        max_usage_count: i32,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: Self::generate_code(),
            employee_id,
            employment_id,
            purpose,
            status: CodeStatus::Active,
            max_usage_count,
            current_usage_count: 0,
            expires_at,
            require_approval: false,
            allowed_domains: None,
            created_at: Utc::now(),
            updated_at: None,
            last_used_at: None,
        }
    }

    /// Generates a candidate code string in the `SL-XXXX-XXXX-XXXX` format
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let segments: Vec<String> = (0..CODE_SEGMENTS)
            .map(|_| {
                (0..CODE_SEGMENT_LENGTH)
                    .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
                    .collect()
            })
            .collect();
        format!("{}-{}", CODE_PREFIX, segments.join("-"))
    }

    /// Replaces the code string with a new candidate
    ///
    /// Used when the store rejects an insert because the candidate collided
    /// with an existing code.
    pub fn regenerate_code(&mut self) {
        self.code = Self::generate_code();
    }

    /// Checks if a string matches the `SL-XXXX-XXXX-XXXX` format
    pub fn is_valid_format(code: &str) -> bool {
        CODE_FORMAT.is_match(code)
    }

    /// Checks if the code has passed its expiry timestamp
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Checks if the usage allowance has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.current_usage_count >= self.max_usage_count
    }

    /// Number of redemptions still available
    pub fn remaining_uses(&self) -> i32 {
        (self.max_usage_count - self.current_usage_count).max(0)
    }

    /// Checks if the code can currently be redeemed
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.status == CodeStatus::Active && !self.is_expired_at(now) && !self.is_exhausted()
    }

    /// Domains allowed to redeem this code, parsed from the stored
    /// comma-separated list
    pub fn allowed_domain_list(&self) -> Vec<String> {
        self.allowed_domains
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(|d| d.trim().to_lowercase())
                    .filter(|d| !d.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(max_usage: i32, expires_in_hours: i64) -> VerificationCode {
        VerificationCode::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Job application at Acme".to_string(),
            max_usage,
            Utc::now() + Duration::hours(expires_in_hours),
        )
    }

    #[test]
    fn test_new_code_is_active() {
        let code = sample(1, 24);
        assert_eq!(code.status, CodeStatus::Active);
        assert_eq!(code.current_usage_count, 0);
        assert!(code.is_redeemable_at(Utc::now()));
        assert!(code.last_used_at.is_none());
    }

    #[test]
    fn test_generated_code_format() {
        for _ in 0..100 {
            let code = VerificationCode::generate_code();
            assert!(
                VerificationCode::is_valid_format(&code),
                "bad format: {}",
                code
            );
        }
    }

    #[test]
    fn test_format_rejects_bad_strings() {
        assert!(VerificationCode::is_valid_format("SL-AB12-CD34-EF56"));
        assert!(!VerificationCode::is_valid_format("SL-ab12-CD34-EF56"));
        assert!(!VerificationCode::is_valid_format("XX-AB12-CD34-EF56"));
        assert!(!VerificationCode::is_valid_format("SL-AB12-CD34"));
        assert!(!VerificationCode::is_valid_format("SL-AB12-CD34-EF567"));
        assert!(!VerificationCode::is_valid_format(""));
    }

    #[test]
    fn test_regenerate_changes_candidate() {
        let mut code = sample(1, 24);
        let original = code.code.clone();
        // A collision between two fresh 12-char candidates is implausible
        code.regenerate_code();
        assert_ne!(code.code, original);
        assert!(VerificationCode::is_valid_format(&code.code));
    }

    #[test]
    fn test_expiry_check() {
        let mut code = sample(1, 24);
        assert!(!code.is_expired_at(Utc::now()));
        code.expires_at = Utc::now() - Duration::minutes(1);
        assert!(code.is_expired_at(Utc::now()));
        assert!(!code.is_redeemable_at(Utc::now()));
    }

    #[test]
    fn test_usage_exhaustion() {
        let mut code = sample(2, 24);
        assert_eq!(code.remaining_uses(), 2);
        code.current_usage_count = 1;
        assert!(!code.is_exhausted());
        code.current_usage_count = 2;
        assert!(code.is_exhausted());
        assert_eq!(code.remaining_uses(), 0);
        assert!(!code.is_redeemable_at(Utc::now()));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!CodeStatus::Active.is_terminal());
        assert!(CodeStatus::Expired.is_terminal());
        assert!(CodeStatus::Revoked.is_terminal());
        assert!(CodeStatus::Used.is_terminal());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            CodeStatus::Active,
            CodeStatus::Expired,
            CodeStatus::Revoked,
            CodeStatus::Used,
        ] {
            assert_eq!(CodeStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CodeStatus::parse("disabled"), None);
    }

    #[test]
    fn test_allowed_domain_list() {
        let mut code = sample(1, 24);
        assert!(code.allowed_domain_list().is_empty());
        code.allowed_domains = Some("Acme.com, hr.example.org".to_string());
        assert_eq!(
            code.allowed_domain_list(),
            vec!["acme.com".to_string(), "hr.example.org".to_string()]
        );
    }
}
