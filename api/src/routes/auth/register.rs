use actix_web::{web, HttpResponse};
use validator::Validate;

use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};
use sl_core::services::auth::RegisterInput;

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/register
///
/// Creates an account (employee or employer), generates the role-specific
/// public identifiers, and returns a token pair so the new user is logged
/// in immediately.
pub async fn register<U, E, V, A, S>(
    state: web::Data<AppState<U, E, V, A, S>>,
    request: web::Json<RegisterRequest>,
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

    let request = request.into_inner();
    let input = RegisterInput {
        email: request.email,
        password: request.password,
        full_name: request.full_name,
        user_type: request.user_type,
        phone_number: request.phone_number,
        location: request.location,
        bio: request.bio,
        company_name: request.company_name,
        company_website: request.company_website,
        company_size: request.company_size,
    };

    match state.auth_service.register(input).await {
        Ok((_user, tokens)) => HttpResponse::Created().json(AuthResponse::from(tokens)),
        Err(error) => handle_domain_error(error),
    }
}
