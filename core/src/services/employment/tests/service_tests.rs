use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use sl_shared::types::Pagination;

use crate::domain::entities::employment::{EmploymentStatus, EmploymentType};
use crate::errors::DomainError;
use crate::repositories::MockEmploymentRepository;
use crate::services::employment::{CreateEmploymentInput, EmploymentService};

fn service() -> (
    Arc<MockEmploymentRepository>,
    EmploymentService<MockEmploymentRepository>,
) {
    let repo = Arc::new(MockEmploymentRepository::new());
    let service = EmploymentService::new(repo.clone());
    (repo, service)
}

fn input(company: &str) -> CreateEmploymentInput {
    CreateEmploymentInput {
        company_name: company.to_string(),
        job_title: "Engineer".to_string(),
        employment_type: EmploymentType::FullTime,
        start_date: Utc::now(),
        company_website: None,
        company_location: Some("Berlin".to_string()),
        department: None,
        salary_range: None,
        benefits: None,
        job_description: None,
        manager_name: None,
        manager_email: None,
    }
}

#[tokio::test]
async fn test_create_and_list() {
    let (_repo, service) = service();
    let employee = Uuid::new_v4();

    service.create(employee, input("Acme")).await.unwrap();
    service.create(employee, input("Globex")).await.unwrap();

    let (records, total) = service
        .list(employee, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_get_enforces_ownership() {
    let (_repo, service) = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let employment = service.create(owner, input("Acme")).await.unwrap();

    assert!(service.get(employment.id, owner).await.is_ok());
    assert!(matches!(
        service.get(employment.id, stranger).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(matches!(
        service.get(Uuid::new_v4(), owner).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_set_as_current_ends_others() {
    let (_repo, service) = service();
    let employee = Uuid::new_v4();
    let first = service.create(employee, input("Acme")).await.unwrap();
    let second = service.create(employee, input("Globex")).await.unwrap();

    let promoted = service.set_as_current(second.id, employee).await.unwrap();
    assert_eq!(promoted.employment_status, EmploymentStatus::Current);

    let demoted = service.get(first.id, employee).await.unwrap();
    assert_eq!(demoted.employment_status, EmploymentStatus::Ended);
    assert!(demoted.end_date.is_some());
}

#[tokio::test]
async fn test_end_employment() {
    let (_repo, service) = service();
    let employee = Uuid::new_v4();
    let employment = service.create(employee, input("Acme")).await.unwrap();

    let ended = service
        .end_employment(employment.id, employee, None)
        .await
        .unwrap();
    assert_eq!(ended.employment_status, EmploymentStatus::Ended);
    assert!(ended.end_date.is_some());
}

#[tokio::test]
async fn test_delete() {
    let (_repo, service) = service();
    let employee = Uuid::new_v4();
    let employment = service.create(employee, input("Acme")).await.unwrap();

    service.delete(employment.id, employee).await.unwrap();
    assert!(matches!(
        service.get(employment.id, employee).await,
        Err(DomainError::NotFound { .. })
    ));
}
