use actix_web::{web, HttpResponse};
use validator::Validate;

use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/login
///
/// Verifies the email/password pair and returns a fresh token pair.
pub async fn login<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    request: web::Json<LoginRequest>,
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
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok((_user, tokens)) => HttpResponse::Ok().json(AuthResponse::from(tokens)),
        Err(error) => handle_domain_error(error),
    }
}
