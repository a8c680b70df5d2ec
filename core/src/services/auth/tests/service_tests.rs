use std::sync::Arc;

use sl_shared::config::JwtConfig;

use crate::domain::entities::user::UserType;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, RegisterInput};
use crate::services::token::TokenService;

fn service() -> (Arc<MockUserRepository>, AuthService<MockUserRepository>) {
    let repo = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(TokenService::new(JwtConfig::new("test-secret")));
    let service = AuthService::new(repo.clone(), tokens);
    (repo, service)
}

fn employee_input(email: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_string(),
        password: "correct horse battery staple".to_string(),
        full_name: "Alice Doe".to_string(),
        user_type: UserType::Employee,
        phone_number: None,
        location: None,
        bio: None,
        company_name: None,
        company_website: None,
        company_size: None,
    }
}

fn employer_input(email: &str, company: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_string(),
        password: "hunter2hunter2".to_string(),
        full_name: "Bob HR".to_string(),
        user_type: UserType::Employer,
        phone_number: None,
        location: None,
        bio: None,
        company_name: Some(company.to_string()),
        company_website: None,
        company_size: Some("50-200".to_string()),
    }
}

#[tokio::test]
async fn test_register_employee_generates_public_id() {
    let (_repo, service) = service();

    let (user, tokens) = service.register(employee_input("alice@example.com")).await.unwrap();

    assert_eq!(user.user_type, UserType::Employee);
    let public_id = user.public_id.expect("employee gets a public id");
    assert_eq!(public_id.len(), 6);
    assert!(user.employer_number.is_none());
    assert!(user.last_login_at.is_none()); // returned snapshot predates login stamp
    assert_eq!(tokens.token_type, "bearer");
    // Password must never be stored in the clear
    assert_ne!(user.hashed_password, "correct horse battery staple");
}

#[tokio::test]
async fn test_register_employer_generates_number_and_handle() {
    let (_repo, service) = service();

    let (user, _tokens) = service
        .register(employer_input("hr@acme.com", "Acme Corp"))
        .await
        .unwrap();

    assert_eq!(user.user_type, UserType::Employer);
    let number = user.employer_number.expect("employer gets a number");
    assert!((100_000..=999_999).contains(&number));
    assert_eq!(user.company_handle.as_deref(), Some("acmecorp"));
    assert!(user.public_id.is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let (_repo, service) = service();
    service.register(employee_input("alice@example.com")).await.unwrap();

    let result = service.register(employee_input("alice@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_company_handle_dedup_suffix() {
    let (_repo, service) = service();
    service
        .register(employer_input("hr1@acme.com", "Acme Corp"))
        .await
        .unwrap();
    let (second, _) = service
        .register(employer_input("hr2@acme.com", "Acme Corp"))
        .await
        .unwrap();

    assert_eq!(second.company_handle.as_deref(), Some("acmecorp1"));
}

#[tokio::test]
async fn test_login_roundtrip() {
    let (repo, service) = service();
    service.register(employee_input("alice@example.com")).await.unwrap();

    let (user, tokens) = service
        .login("alice@example.com", "correct horse battery staple")
        .await
        .unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert!(!tokens.access_token.is_empty());
    // The login stamp landed in the store
    let stored = repo.get_all().into_iter().next().unwrap();
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (_repo, service) = service();
    service.register(employee_input("alice@example.com")).await.unwrap();

    let result = service.login("alice@example.com", "wrong").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (_repo, service) = service();
    let result = service.login("ghost@example.com", "whatever").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_inactive_account() {
    let (repo, service) = service();
    let (user, _) = service.register(employee_input("alice@example.com")).await.unwrap();

    let mut stored = repo.get_all().into_iter().find(|u| u.id == user.id).unwrap();
    stored.deactivate();
    repo.update(stored).await.unwrap();

    let result = service
        .login("alice@example.com", "correct horse battery staple")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountInactive))
    ));
}

#[tokio::test]
async fn test_refresh_tokens() {
    let (_repo, service) = service();
    let (_user, tokens) = service.register(employee_input("alice@example.com")).await.unwrap();

    let refreshed = service.refresh_tokens(&tokens.refresh_token).await.unwrap();
    assert!(!refreshed.access_token.is_empty());

    // An access token is not accepted as a refresh token
    assert!(service.refresh_tokens(&tokens.access_token).await.is_err());
}
