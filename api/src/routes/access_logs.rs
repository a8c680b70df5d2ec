//! Access log route handlers.
//!
//! Employees see attempts against their codes and run the approval
//! workflow; employers see their own requests.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};
use sl_shared::types::Pagination;

use crate::app::AppState;
use crate::dto::access_log::ApprovalDecisionResponse;
use crate::handlers::error::{forbidden_role, handle_domain_error};
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/access-logs
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
    let user = match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => user,
        Err(error) => return handle_domain_error(error),
    };

    let pagination = pagination.into_inner().validate();
    match state
        .access_log_service
        .list_for_user(&user, &pagination)
        .await
    {
        Ok(logs) => HttpResponse::Ok().json(logs),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/access-logs/{id}
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
    let user = match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => user,
        Err(error) => return handle_domain_error(error),
    };

    match state
        .access_log_service
        .get_log(path.into_inner(), &user)
        .await
    {
        Ok(log) => HttpResponse::Ok().json(log),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/access-logs/verification-code/{code_id}
///
/// Employee-only; foreign or unknown codes yield an empty list rather than
/// an error.
pub async fn list_by_code<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
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
        return forbidden_role("Only employees can access verification code logs");
    }

    let pagination = pagination.into_inner().validate();
    match state
        .access_log_service
        .list_for_code(path.into_inner(), auth.user_id, &pagination)
        .await
    {
        Ok(logs) => HttpResponse::Ok().json(logs),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/access-logs/pending-approvals
pub async fn pending_approvals<U, E, V, A, S>(
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
        return forbidden_role("Only employees can review approval requests");
    }

    let pagination = pagination.into_inner().validate();
    match state
        .access_log_service
        .pending_approvals(auth.user_id, &pagination)
        .await
    {
        Ok(logs) => HttpResponse::Ok().json(logs),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/access-logs/stats
pub async fn stats<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    let user = match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => user,
        Err(error) => return handle_domain_error(error),
    };

    match state.access_log_service.stats(&user).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/access-logs/{id}/approve
pub async fn approve<U, E, V, A, S>(
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
    if !auth.is_employee() {
        return forbidden_role("Only employees can approve access requests");
    }

    match state
        .access_log_service
        .approve(path.into_inner(), auth.user_id)
        .await
    {
        Ok(_log) => HttpResponse::Ok().json(ApprovalDecisionResponse::approved()),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/access-logs/{id}/deny
pub async fn deny<U, E, V, A, S>(
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
    if !auth.is_employee() {
        return forbidden_role("Only employees can deny access requests");
    }

    match state
        .access_log_service
        .deny(path.into_inner(), auth.user_id)
        .await
    {
        Ok(_log) => HttpResponse::Ok().json(ApprovalDecisionResponse::denied()),
        Err(error) => handle_domain_error(error),
    }
}
