use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::access_log::ApprovalStatus;
use crate::domain::entities::employment::{Employment, EmploymentType};
use crate::domain::entities::user::{User, UserType};
use crate::domain::entities::verification_code::{CodeStatus, VerificationCode};
use crate::domain::value_objects::RequestMetadata;
use crate::errors::DomainError;
use crate::repositories::MockRedemptionStore;
use crate::services::redemption::RedemptionService;

struct Fixture {
    store: Arc<MockRedemptionStore>,
    service: RedemptionService<MockRedemptionStore>,
    employer_id: Uuid,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(MockRedemptionStore::new());
        let service = RedemptionService::new(store.clone());
        Self {
            store,
            service,
            employer_id: Uuid::new_v4(),
        }
    }

    /// Seed an employee, an employment, and a code over them
    fn seed_code(&self, max_usage: i32, expires_in_minutes: i64) -> VerificationCode {
        self.seed_code_with(max_usage, expires_in_minutes, |_| {})
    }

    /// Seed a code after applying a mutation (status, flags, ...)
    fn seed_code_with(
        &self,
        max_usage: i32,
        expires_in_minutes: i64,
        mutate: impl FnOnce(&mut VerificationCode),
    ) -> VerificationCode {
        let employee = User::new(
            "alice@example.com".to_string(),
            "hash".to_string(),
            "Alice Doe".to_string(),
            UserType::Employee,
        );
        let mut employment = Employment::new(
            employee.id,
            "Acme Corp".to_string(),
            "Engineer".to_string(),
            EmploymentType::FullTime,
            Utc::now() - Duration::days(400),
        );
        employment.department = Some("Platform".to_string());
        employment.is_verified = true;

        let mut code = VerificationCode::new(
            employee.id,
            employment.id,
            "Background check".to_string(),
            max_usage,
            Utc::now() + Duration::minutes(expires_in_minutes),
        );
        mutate(&mut code);

        self.store.insert_user(employee);
        self.store.insert_employment(employment);
        self.store.insert_code(code.clone());
        code
    }
}

fn metadata() -> RequestMetadata {
    RequestMetadata::new(
        Some("203.0.113.7".to_string()),
        Some("curl/8.0".to_string()),
        Some("Pre-employment screening".to_string()),
    )
}

#[tokio::test]
async fn test_single_use_roundtrip() {
    let f = Fixture::new();
    let code = f.seed_code(1, 60);

    let first = f
        .service
        .verify_code(&code.code, f.employer_id, metadata())
        .await
        .unwrap();
    assert!(first.success);
    assert_eq!(first.message, "Employment verification successful");
    assert_eq!(first.employee_name.as_deref(), Some("Alice Doe"));
    assert_eq!(first.company_name.as_deref(), Some("Acme Corp"));
    let snapshot = first.data.unwrap();
    assert_eq!(snapshot.job_title, "Engineer");
    assert!(snapshot.is_verified);

    let stored = f.store.get_code(code.id).unwrap();
    assert_eq!(stored.status, CodeStatus::Used);
    assert_eq!(stored.current_usage_count, 1);
    assert!(stored.last_used_at.is_some());

    let second = f
        .service
        .verify_code(&code.code, f.employer_id, metadata())
        .await
        .unwrap();
    assert!(!second.success);
    // The status check fires before the usage check once the code is used
    assert_eq!(second.message, "Verification code is used");

    assert_eq!(f.store.get_logs().len(), 2);
}

#[tokio::test]
async fn test_unknown_code_logged_without_reference() {
    let f = Fixture::new();

    let outcome = f
        .service
        .verify_code("SL-0000-0000-0000", f.employer_id, metadata())
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Invalid verification code");
    assert!(outcome.data.is_none());

    let logs = f.store.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].verification_code_id.is_none());
    assert!(!logs[0].success);
    assert_eq!(
        logs[0].error_message.as_deref(),
        Some("Invalid verification code")
    );
    assert_eq!(logs[0].employer_id, f.employer_id);
}

#[tokio::test]
async fn test_revoked_code_rejected() {
    let f = Fixture::new();
    let code = f.seed_code_with(1, 60, |c| c.status = CodeStatus::Revoked);

    let outcome = f
        .service
        .verify_code(&code.code, f.employer_id, metadata())
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Verification code is revoked");

    let logs = f.store.get_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].error_message.as_deref(), Some("Code is revoked"));
    assert_eq!(logs[0].verification_code_id, Some(code.id));
}

#[tokio::test]
async fn test_expired_code_flips_status() {
    let f = Fixture::new();
    let code = f.seed_code(1, -5); // already past expiry

    let outcome = f
        .service
        .verify_code(&code.code, f.employer_id, metadata())
        .await
        .unwrap();

    assert!(!outcome.success);
    assert!(outcome.message.contains("expired"));
    assert_eq!(outcome.message, "Verification code has expired");

    let stored = f.store.get_code(code.id).unwrap();
    assert_eq!(stored.status, CodeStatus::Expired);

    let logs = f.store.get_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].error_message.as_deref(), Some("Code has expired"));
}

#[tokio::test]
async fn test_multi_use_allowance() {
    let f = Fixture::new();
    let code = f.seed_code(2, 60);

    for _ in 0..2 {
        let outcome = f
            .service
            .verify_code(&code.code, f.employer_id, metadata())
            .await
            .unwrap();
        assert!(outcome.success);
    }

    let stored = f.store.get_code(code.id).unwrap();
    assert_eq!(stored.current_usage_count, 2);
    assert_eq!(stored.status, CodeStatus::Used);

    let third = f
        .service
        .verify_code(&code.code, f.employer_id, metadata())
        .await
        .unwrap();
    assert!(!third.success);

    assert_eq!(f.store.get_logs().len(), 3);
}

#[tokio::test]
async fn test_success_log_carries_snapshot_and_context() {
    let f = Fixture::new();
    let code = f.seed_code(1, 60);

    f.service
        .verify_code(&code.code, f.employer_id, metadata())
        .await
        .unwrap();

    let logs = f.store.get_logs();
    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert!(log.success);
    assert_eq!(log.verification_code_id, Some(code.id));
    assert_eq!(log.ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(log.user_agent.as_deref(), Some("curl/8.0"));
    assert_eq!(
        log.request_purpose.as_deref(),
        Some("Pre-employment screening")
    );
    let disclosed = log.data_accessed.as_ref().unwrap();
    assert_eq!(disclosed["company_name"], "Acme Corp");
    assert_eq!(disclosed["job_title"], "Engineer");
}

#[tokio::test]
async fn test_approval_gated_code_marks_log_pending() {
    let f = Fixture::new();
    let code = f.seed_code_with(1, 60, |c| c.require_approval = true);

    let outcome = f
        .service
        .verify_code(&code.code, f.employer_id, metadata())
        .await
        .unwrap();
    assert!(outcome.success);

    let log = f
        .store
        .get_logs()
        .into_iter()
        .find(|l| l.verification_code_id == Some(code.id))
        .unwrap();
    assert!(log.requires_approval);
    assert_eq!(log.approval_status, Some(ApprovalStatus::Pending));
}

#[tokio::test]
async fn test_store_fault_propagates() {
    let f = Fixture::new();
    let code = f.seed_code(1, 60);
    f.store.set_should_fail(true);

    let result = f
        .service
        .verify_code(&code.code, f.employer_id, metadata())
        .await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_redemptions_never_overshoot() {
    const ATTEMPTS: usize = 8;

    let f = Fixture::new();
    let code = f.seed_code(1, 60);
    let service = Arc::new(f.service);

    let mut handles = Vec::new();
    for _ in 0..ATTEMPTS {
        let service = service.clone();
        let code_str = code.code.clone();
        let employer_id = f.employer_id;
        handles.push(tokio::spawn(async move {
            service
                .verify_code(&code_str, employer_id, RequestMetadata::default())
                .await
                .unwrap()
        }));
    }

    let mut successes = 0;
    let mut failures = 0;
    for handle in handles {
        let outcome = handle.await.unwrap();
        if outcome.success {
            successes += 1;
        } else {
            failures += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(failures, ATTEMPTS - 1);

    // Exactly one audit row per attempt
    assert_eq!(f.store.get_logs().len(), ATTEMPTS);

    // The counter never exceeds the allowance and the state is terminal
    let stored = f.store.get_code(code.id).unwrap();
    assert_eq!(stored.current_usage_count, 1);
    assert_eq!(stored.status, CodeStatus::Used);
}
