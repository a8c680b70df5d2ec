use actix_web::{web, HttpResponse};

use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, RefreshTokenRequest};
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a valid refresh token for a new token pair.
pub async fn refresh<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    match state
        .auth_service
        .refresh_tokens(&request.refresh_token)
        .await
    {
        Ok(tokens) => HttpResponse::Ok().json(AuthResponse::from(tokens)),
        Err(error) => handle_domain_error(error),
    }
}
