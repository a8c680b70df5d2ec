//! End-to-end tests of the HTTP surface over in-memory repositories.
//!
//! The redemption store is a separate seam from the per-entity
//! repositories, so the redemption tests mirror created entities into it
//! the same way the MySQL implementations share one database.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use sl_api::app::{create_app, AppState};
use sl_core::repositories::{
    MockAccessLogRepository, MockEmploymentRepository, MockRedemptionStore,
    MockUserRepository, MockVerificationCodeRepository,
};
use sl_core::services::access_log::AccessLogService;
use sl_core::services::auth::AuthService;
use sl_core::services::employment::EmploymentService;
use sl_core::services::redemption::RedemptionService;
use sl_core::services::token::TokenService;
use sl_core::services::verification::VerificationCodeService;
use sl_shared::config::{JwtConfig, VerificationConfig};

struct TestContext {
    users: Arc<MockUserRepository>,
    employments: Arc<MockEmploymentRepository>,
    codes: Arc<MockVerificationCodeRepository>,
    logs: Arc<MockAccessLogRepository>,
    redemptions: Arc<MockRedemptionStore>,
    state: web::Data<
        AppState<
            MockUserRepository,
            MockEmploymentRepository,
            MockVerificationCodeRepository,
            MockAccessLogRepository,
            MockRedemptionStore,
        >,
    >,
    tokens: web::Data<Arc<TokenService>>,
}

fn test_context() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let employments = Arc::new(MockEmploymentRepository::new());
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let logs = Arc::new(MockAccessLogRepository::new());
    let redemptions = Arc::new(MockRedemptionStore::new());

    let token_service = Arc::new(TokenService::new(JwtConfig::new("integration-test-secret")));
    let state = web::Data::new(AppState {
        auth_service: Arc::new(AuthService::new(users.clone(), token_service.clone())),
        employment_service: Arc::new(EmploymentService::new(employments.clone())),
        verification_service: Arc::new(VerificationCodeService::new(
            codes.clone(),
            employments.clone(),
            VerificationConfig::default(),
        )),
        redemption_service: Arc::new(RedemptionService::new(redemptions.clone())),
        access_log_service: Arc::new(AccessLogService::new(logs.clone(), codes.clone())),
    });

    TestContext {
        users,
        employments,
        codes,
        logs,
        redemptions,
        state,
        tokens: web::Data::new(token_service),
    }
}

/// Register a user through the API and return their access token
macro_rules! register {
    ($app:expr, $email:expr, $user_type:expr) => {{
        let mut body = json!({
            "email": $email,
            "password": "correct horse battery staple",
            "full_name": "Test User",
            "user_type": $user_type,
        });
        if $user_type == "employer" {
            body["company_name"] = json!("Globex Corp");
        }

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&body)
            .to_request();
        let resp: Value = test::call_and_read_body_json($app, req).await;
        resp["access_token"]
            .as_str()
            .expect("register returns an access token")
            .to_string()
    }};
}

#[actix_rt::test]
async fn test_register_login_me_flow() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.tokens.clone())).await;

    let token = register!(&app, "alice@example.com", "employee");

    // me returns the profile without the password hash
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["email"], "alice@example.com");
    assert_eq!(me["user_type"], "employee");
    assert!(me["public_id"].is_string());
    assert!(me.get("hashed_password").is_none());

    // login works with the registered credentials
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({
            "email": "alice@example.com",
            "password": "correct horse battery staple",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // wrong password is a 401
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({
            "email": "alice@example.com",
            "password": "wrong password!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // duplicate registration is a 409
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": "alice@example.com",
            "password": "correct horse battery staple",
            "full_name": "Alice Again",
            "user_type": "employee",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_protected_routes_require_token() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.tokens.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/employments")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/employments")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_employment_crud_and_role_gate() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.tokens.clone())).await;

    let employee_token = register!(&app, "alice@example.com", "employee");
    let employer_token = register!(&app, "hr@globex.com", "employer");

    // Employers cannot create employment records
    let req = test::TestRequest::post()
        .uri("/api/v1/employments")
        .insert_header(("Authorization", format!("Bearer {}", employer_token)))
        .set_json(json!({
            "company_name": "Acme Corp",
            "job_title": "Engineer",
            "employment_type": "full_time",
            "start_date": "2023-01-15T00:00:00Z",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Employees can
    let req = test::TestRequest::post()
        .uri("/api/v1/employments")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .set_json(json!({
            "company_name": "Acme Corp",
            "job_title": "Engineer",
            "employment_type": "full_time",
            "start_date": "2023-01-15T00:00:00Z",
            "department": "Platform",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let employment: Value = test::read_body_json(resp).await;
    let employment_id = employment["id"].as_str().unwrap().to_string();

    // List shows it
    let req = test::TestRequest::get()
        .uri("/api/v1/employments")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["data"][0]["company_name"], "Acme Corp");

    // Update
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/employments/{}", employment_id))
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .set_json(json!({ "job_title": "Staff Engineer" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["job_title"], "Staff Engineer");
}

#[actix_rt::test]
async fn test_code_lifecycle_over_http() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.tokens.clone())).await;

    let employee_token = register!(&app, "alice@example.com", "employee");

    let req = test::TestRequest::post()
        .uri("/api/v1/employments")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .set_json(json!({
            "company_name": "Acme Corp",
            "job_title": "Engineer",
            "employment_type": "full_time",
            "start_date": "2023-01-15T00:00:00Z",
        }))
        .to_request();
    let employment: Value = test::call_and_read_body_json(&app, req).await;
    let employment_id = employment["id"].as_str().unwrap();

    // Create a code
    let req = test::TestRequest::post()
        .uri("/api/v1/verification-codes")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .set_json(json!({
            "employment_id": employment_id,
            "purpose": "Job application at Globex",
            "max_usage_count": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let code: Value = test::read_body_json(resp).await;
    assert_eq!(code["status"], "active");
    let code_string = code["code"].as_str().unwrap();
    assert!(code_string.starts_with("SL-"));
    let code_id = code["id"].as_str().unwrap().to_string();

    // Revoke it
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/verification-codes/{}/revoke", code_id))
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/verification-codes/{}", code_id))
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["status"], "revoked");
}

#[actix_rt::test]
async fn test_redemption_over_http() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.tokens.clone())).await;

    let employee_token = register!(&app, "alice@example.com", "employee");
    let employer_token = register!(&app, "hr@globex.com", "employer");

    // Employee registers an employment and issues a code
    let req = test::TestRequest::post()
        .uri("/api/v1/employments")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .set_json(json!({
            "company_name": "Acme Corp",
            "job_title": "Engineer",
            "employment_type": "full_time",
            "start_date": "2023-01-15T00:00:00Z",
        }))
        .to_request();
    let employment: Value = test::call_and_read_body_json(&app, req).await;
    let employment_id = employment["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/verification-codes")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .set_json(json!({
            "employment_id": employment_id,
            "purpose": "Job application at Globex",
            "max_usage_count": 1,
        }))
        .to_request();
    let code: Value = test::call_and_read_body_json(&app, req).await;
    let code_string = code["code"].as_str().unwrap().to_string();

    // Mirror the entities into the redemption store, as a shared database
    // would
    for user in ctx.users.get_all() {
        ctx.redemptions.insert_user(user);
    }
    let stored_employment = ctx
        .employments
        .get_all()
        .into_iter()
        .find(|e| e.id.to_string() == employment_id)
        .expect("employment stored");
    ctx.redemptions.insert_employment(stored_employment);
    let stored_code = ctx
        .codes
        .get_all()
        .into_iter()
        .find(|c| c.code == code_string)
        .expect("code stored");
    ctx.redemptions.insert_code(stored_code);

    // Employees cannot redeem
    let req = test::TestRequest::post()
        .uri("/api/v1/verification-codes/verify")
        .insert_header(("Authorization", format!("Bearer {}", employee_token)))
        .set_json(json!({ "code": code_string }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The employer redeems successfully
    let req = test::TestRequest::post()
        .uri("/api/v1/verification-codes/verify")
        .insert_header(("Authorization", format!("Bearer {}", employer_token)))
        .insert_header(("User-Agent", "integration-test/1.0"))
        .set_json(json!({ "code": code_string, "purpose": "Pre-employment screening" }))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["company_name"], "Acme Corp");
    assert_eq!(outcome["data"]["job_title"], "Engineer");

    // A second redemption of the single-use code is rejected with 200
    let req = test::TestRequest::post()
        .uri("/api/v1/verification-codes/verify")
        .insert_header(("Authorization", format!("Bearer {}", employer_token)))
        .set_json(json!({ "code": code_string }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = test::read_body_json(resp).await;
    assert_eq!(outcome["success"], false);
    assert_eq!(outcome["message"], "Verification code is used");

    // An unknown code is rejected with 200 as well
    let req = test::TestRequest::post()
        .uri("/api/v1/verification-codes/verify")
        .insert_header(("Authorization", format!("Bearer {}", employer_token)))
        .set_json(json!({ "code": "SL-0000-0000-0000" }))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["success"], false);
    assert_eq!(outcome["message"], "Invalid verification code");

    // Exactly one audit row per attempt landed in the store
    assert_eq!(ctx.redemptions.get_logs().len(), 3);

    // Unused mocks stay quiet but are part of the wiring
    assert!(ctx.logs.get_all().is_empty());
}
