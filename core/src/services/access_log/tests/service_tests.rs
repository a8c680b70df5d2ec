use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use sl_shared::types::Pagination;

use crate::domain::entities::access_log::{AccessLog, ApprovalStatus};
use crate::domain::entities::user::{User, UserType};
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;
use crate::repositories::{MockAccessLogRepository, MockVerificationCodeRepository};
use crate::services::access_log::AccessLogService;

type Service = AccessLogService<MockAccessLogRepository, MockVerificationCodeRepository>;

struct Fixture {
    logs: Arc<MockAccessLogRepository>,
    service: Service,
    employee: User,
    employer: User,
    code: VerificationCode,
}

fn fixture() -> Fixture {
    let logs = Arc::new(MockAccessLogRepository::new());
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let service = AccessLogService::new(logs.clone(), codes.clone());

    let employee = User::new(
        "alice@example.com".to_string(),
        "hash".to_string(),
        "Alice Doe".to_string(),
        UserType::Employee,
    );
    let employer = User::new(
        "hr@globex.com".to_string(),
        "hash".to_string(),
        "Globex HR".to_string(),
        UserType::Employer,
    );
    let code = VerificationCode::new(
        employee.id,
        Uuid::new_v4(),
        "Background check".to_string(),
        1,
        Utc::now() + Duration::hours(24),
    );
    codes.insert(code.clone());
    logs.set_code_owner(code.id, employee.id);

    Fixture {
        logs,
        service,
        employee,
        employer,
        code,
    }
}

fn seed_success_log(f: &Fixture, requires_approval: bool) -> AccessLog {
    let mut log = AccessLog::success(f.code.id, f.employer.id);
    if requires_approval {
        log = log.with_approval_required();
    }
    f.logs.insert(log.clone());
    log
}

#[tokio::test]
async fn test_role_scoped_listing() {
    let f = fixture();
    seed_success_log(&f, false);
    f.logs
        .insert(AccessLog::failure(None, f.employer.id, "Invalid verification code"));

    // Employee sees only attempts against their codes; the unknown-code
    // attempt has no owner
    let employee_view = f
        .service
        .list_for_user(&f.employee, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(employee_view.len(), 1);

    // Employer sees both of their own requests
    let employer_view = f
        .service
        .list_for_user(&f.employer, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(employer_view.len(), 2);
}

#[tokio::test]
async fn test_get_log_access_control() {
    let f = fixture();
    let log = seed_success_log(&f, false);

    assert!(f.service.get_log(log.id, &f.employee).await.is_ok());
    assert!(f.service.get_log(log.id, &f.employer).await.is_ok());

    let stranger_employee = User::new(
        "eve@example.com".to_string(),
        "hash".to_string(),
        "Eve".to_string(),
        UserType::Employee,
    );
    assert!(matches!(
        f.service.get_log(log.id, &stranger_employee).await,
        Err(DomainError::Forbidden { .. })
    ));

    let stranger_employer = User::new(
        "hr@initech.com".to_string(),
        "hash".to_string(),
        "Initech HR".to_string(),
        UserType::Employer,
    );
    assert!(matches!(
        f.service.get_log(log.id, &stranger_employer).await,
        Err(DomainError::Forbidden { .. })
    ));
}

#[tokio::test]
async fn test_list_for_code_hides_foreign_codes() {
    let f = fixture();
    seed_success_log(&f, false);

    let owned = f
        .service
        .list_for_code(f.code.id, f.employee.id, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);

    // A foreign or unknown code yields an empty list, not an error
    let foreign = f
        .service
        .list_for_code(f.code.id, Uuid::new_v4(), &Pagination::default())
        .await
        .unwrap();
    assert!(foreign.is_empty());

    let unknown = f
        .service
        .list_for_code(Uuid::new_v4(), f.employee.id, &Pagination::default())
        .await
        .unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn test_approval_roundtrip() {
    let f = fixture();
    let log = seed_success_log(&f, true);

    let pending = f
        .service
        .pending_approvals(f.employee.id, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let decided = f.service.approve(log.id, f.employee.id).await.unwrap();
    assert_eq!(decided.approval_status, Some(ApprovalStatus::Approved));
    assert_eq!(decided.approved_by, Some(f.employee.id));
    assert!(decided.approved_at.is_some());

    let pending_after = f
        .service
        .pending_approvals(f.employee.id, &Pagination::default())
        .await
        .unwrap();
    assert!(pending_after.is_empty());
}

#[tokio::test]
async fn test_decision_is_write_once() {
    let f = fixture();
    let log = seed_success_log(&f, true);

    f.service.approve(log.id, f.employee.id).await.unwrap();

    // A second decision, even the opposite one, is rejected
    let result = f.service.deny(log.id, f.employee.id).await;
    assert!(matches!(result, Err(DomainError::BusinessRule { .. })));

    let stored = f.logs.get_all().into_iter().find(|l| l.id == log.id).unwrap();
    assert_eq!(stored.approval_status, Some(ApprovalStatus::Approved));
}

#[tokio::test]
async fn test_decision_requires_ownership() {
    let f = fixture();
    let log = seed_success_log(&f, true);

    let result = f.service.approve(log.id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::Forbidden { .. })));

    // Unknown-code logs have no owner and can never be decided
    let orphan = AccessLog::failure(None, f.employer.id, "Invalid verification code");
    f.logs.insert(orphan.clone());
    let result = f.service.approve(orphan.id, f.employee.id).await;
    assert!(matches!(result, Err(DomainError::Forbidden { .. })));
}

#[tokio::test]
async fn test_stats() {
    let f = fixture();
    seed_success_log(&f, false);
    seed_success_log(&f, false);
    f.logs.insert(AccessLog::failure(
        Some(f.code.id),
        f.employer.id,
        "Code has expired",
    ));

    let stats = f.service.stats(&f.employee).await.unwrap();
    assert_eq!(stats.total_requests, 3);
    assert_eq!(stats.successful_requests, 2);
    assert_eq!(stats.failed_requests, 1);
    assert!((stats.success_rate - 66.66).abs() < 1.0);
    assert_eq!(stats.recent_requests, 3);

    let employer_stats = f.service.stats(&f.employer).await.unwrap();
    assert_eq!(employer_stats.total_requests, 3);
}

#[tokio::test]
async fn test_stats_empty() {
    let f = fixture();
    let stats = f.service.stats(&f.employee).await.unwrap();
    assert_eq!(stats.total_requests, 0);
    assert_eq!(stats.success_rate, 0.0);
}

#[tokio::test]
async fn test_store_fault_propagates() {
    let f = fixture();
    f.logs.set_should_fail(true);
    let result = f
        .service
        .list_for_user(&f.employee, &Pagination::default())
        .await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
