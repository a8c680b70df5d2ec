//! Verification code route handlers.
//!
//! Code management is employee-only; redemption (`verify`) is
//! employer-only. The role gate lives here at the boundary, the redemption
//! engine itself assumes an employer caller.

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use sl_core::domain::value_objects::RequestMetadata;
use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};
use sl_shared::types::{PaginatedResponse, Pagination};

use crate::app::AppState;
use crate::dto::verification_code::{CreateCodeRequest, VerifyCodeRequest};
use crate::handlers::error::{forbidden_role, handle_domain_error, handle_validation_errors};
use crate::middleware::auth::{extract_client_ip, extract_user_agent, AuthContext};

/// Handler for GET /api/v1/verification-codes
pub async fn list<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    pagination: web::Query<Pagination>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    if !auth.is_employee() {
        return forbidden_role("Only employees can access verification codes");
    }

    let pagination = pagination.into_inner().validate();
    match state
        .verification_service
        .list_codes(auth.user_id, &pagination)
        .await
    {
        Ok((codes, total)) => {
            HttpResponse::Ok().json(PaginatedResponse::new(codes, &pagination, total))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/verification-codes
pub async fn create<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    request: web::Json<CreateCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    if !auth.is_employee() {
        return forbidden_role("Only employees can create verification codes");
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .verification_service
        .create_code(auth.user_id, request.into_inner().into())
        .await
    {
        Ok(code) => HttpResponse::Created().json(code),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/verification-codes/{id}
pub async fn get<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    match state
        .verification_service
        .get_code(path.into_inner(), auth.user_id)
        .await
    {
        Ok(code) => HttpResponse::Ok().json(code),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/verification-codes/{id}/revoke
pub async fn revoke<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    match state
        .verification_service
        .revoke_code(path.into_inner(), auth.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Verification code revoked successfully"
        })),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/verification-codes/verify
///
/// Employer-only. The outcome is always a 200 response; business-rule
/// rejections travel as `success = false` with a human-readable message,
/// and every attempt lands in the access log.
pub async fn verify<U, E, V, A, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    if !auth.is_employer() {
        return forbidden_role("Only employers can verify employment");
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let metadata = RequestMetadata::new(
        extract_client_ip(&req),
        extract_user_agent(&req),
        request.purpose,
    );

    match state
        .redemption_service
        .verify_code(&request.code, auth.user_id, metadata)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(error) => handle_domain_error(error),
    }
}
