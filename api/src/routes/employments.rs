//! Employment record route handlers (employee-only).

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};
use sl_shared::types::{PaginatedResponse, Pagination};

use crate::app::AppState;
use crate::dto::employment::{CreateEmploymentRequest, EndEmploymentRequest, UpdateEmploymentRequest};
use crate::handlers::error::{forbidden_role, handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/employments
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
        return forbidden_role("Only employees can access employment records");
    }

    let pagination = pagination.into_inner().validate();
    match state
        .employment_service
        .list(auth.user_id, &pagination)
        .await
    {
        Ok((records, total)) => {
            HttpResponse::Ok().json(PaginatedResponse::new(records, &pagination, total))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/employments
pub async fn create<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    request: web::Json<CreateEmploymentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    if !auth.is_employee() {
        return forbidden_role("Only employees can create employment records");
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .employment_service
        .create(auth.user_id, request.into_inner().into())
        .await
    {
        Ok(employment) => HttpResponse::Created().json(employment),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/employments/{id}
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
        .employment_service
        .get(path.into_inner(), auth.user_id)
        .await
    {
        Ok(employment) => HttpResponse::Ok().json(employment),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/employments/{id}
pub async fn update<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<UpdateEmploymentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .employment_service
        .update(path.into_inner(), auth.user_id, request.into_inner().into())
        .await
    {
        Ok(employment) => HttpResponse::Ok().json(employment),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/employments/{id}
pub async fn delete<U, E, V, A, S>(
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
        .employment_service
        .delete(path.into_inner(), auth.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Employment record deleted successfully"
        })),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/employments/{id}/set-current
pub async fn set_current<U, E, V, A, S>(
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
        .employment_service
        .set_as_current(path.into_inner(), auth.user_id)
        .await
    {
        Ok(employment) => HttpResponse::Ok().json(employment),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/employments/{id}/end
pub async fn end<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: Option<web::Json<EndEmploymentRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    let end_date = request.and_then(|r| r.into_inner().end_date);
    match state
        .employment_service
        .end_employment(path.into_inner(), auth.user_id, end_date)
        .await
    {
        Ok(employment) => HttpResponse::Ok().json(employment),
        Err(error) => handle_domain_error(error),
    }
}
