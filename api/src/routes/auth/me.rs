use actix_web::{web, HttpResponse};

use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};

use crate::app::AppState;
use crate::dto::user::UserResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the authenticated user's profile.
pub async fn me<U, E, V, A, S>(
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
    match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
