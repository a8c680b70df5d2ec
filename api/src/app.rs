//! Application state and factory
//!
//! This module holds the shared application state and the factory that
//! assembles the Actix-web application with all routes and middleware.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::{middleware::Logger, web, App, HttpResponse};

use sl_core::repositories::{
    AccessLogRepository, EmploymentRepository, RedemptionStore, UserRepository,
    VerificationCodeRepository,
};
use sl_core::services::access_log::AccessLogService;
use sl_core::services::auth::AuthService;
use sl_core::services::employment::EmploymentService;
use sl_core::services::redemption::RedemptionService;
use sl_core::services::token::TokenService;
use sl_core::services::verification::VerificationCodeService;
use sl_shared::types::response::HealthResponse;

use crate::middleware::auth::JwtAuth;
use crate::middleware::cors::create_cors;
use crate::routes;

/// Application state that holds the shared services
pub struct AppState<U, E, V, A, S>
where
    U: UserRepository,
    E: EmploymentRepository,
    V: VerificationCodeRepository,
    A: AccessLogRepository,
    S: RedemptionStore,
{
    pub auth_service: Arc<AuthService<U>>,
    pub employment_service: Arc<EmploymentService<E>>,
    pub verification_service: Arc<VerificationCodeService<V, E>>,
    pub redemption_service: Arc<RedemptionService<S>>,
    pub access_log_service: Arc<AccessLogService<A, V>>,
}

/// Create and configure the application with all routes and middleware
pub fn create_app<U, E, V, A, S>(
    app_state: web::Data<AppState<U, E, V, A, S>>,
    token_service: web::Data<Arc<TokenService>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    E: EmploymentRepository + 'static,
    V: VerificationCodeRepository + 'static,
    A: AccessLogRepository + 'static,
    S: RedemptionStore + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(routes::auth::register::register::<U, E, V, A, S>))
                        .route("/login", web::post().to(routes::auth::login::login::<U, E, V, A, S>))
                        .route("/refresh", web::post().to(routes::auth::refresh::refresh::<U, E, V, A, S>))
                        .service(
                            web::scope("")
                                .wrap(JwtAuth)
                                .route("/me", web::get().to(routes::auth::me::me::<U, E, V, A, S>))
                                .route("/logout", web::post().to(routes::auth::logout::logout)),
                        ),
                )
                .service(
                    web::scope("/employments")
                        .wrap(JwtAuth)
                        .route("", web::get().to(routes::employments::list::<U, E, V, A, S>))
                        .route("", web::post().to(routes::employments::create::<U, E, V, A, S>))
                        .route("/{id}", web::get().to(routes::employments::get::<U, E, V, A, S>))
                        .route("/{id}", web::put().to(routes::employments::update::<U, E, V, A, S>))
                        .route("/{id}", web::delete().to(routes::employments::delete::<U, E, V, A, S>))
                        .route(
                            "/{id}/set-current",
                            web::post().to(routes::employments::set_current::<U, E, V, A, S>),
                        )
                        .route(
                            "/{id}/end",
                            web::post().to(routes::employments::end::<U, E, V, A, S>),
                        ),
                )
                .service(
                    web::scope("/verification-codes")
                        .wrap(JwtAuth)
                        .route("", web::get().to(routes::verification_codes::list::<U, E, V, A, S>))
                        .route("", web::post().to(routes::verification_codes::create::<U, E, V, A, S>))
                        .route(
                            "/verify",
                            web::post().to(routes::verification_codes::verify::<U, E, V, A, S>),
                        )
                        .route("/{id}", web::get().to(routes::verification_codes::get::<U, E, V, A, S>))
                        .route(
                            "/{id}/revoke",
                            web::post().to(routes::verification_codes::revoke::<U, E, V, A, S>),
                        ),
                )
                .service(
                    web::scope("/access-logs")
                        .wrap(JwtAuth)
                        .route("", web::get().to(routes::access_logs::list::<U, E, V, A, S>))
                        .route(
                            "/pending-approvals",
                            web::get().to(routes::access_logs::pending_approvals::<U, E, V, A, S>),
                        )
                        .route("/stats", web::get().to(routes::access_logs::stats::<U, E, V, A, S>))
                        .route(
                            "/verification-code/{code_id}",
                            web::get().to(routes::access_logs::list_by_code::<U, E, V, A, S>),
                        )
                        .route("/{id}", web::get().to(routes::access_logs::get::<U, E, V, A, S>))
                        .route(
                            "/{id}/approve",
                            web::post().to(routes::access_logs::approve::<U, E, V, A, S>),
                        )
                        .route(
                            "/{id}/deny",
                            web::post().to(routes::access_logs::deny::<U, E, V, A, S>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "not_found",
                "message": "The requested resource was not found"
            }))
        }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "sunlighter-api",
        env!("CARGO_PKG_VERSION"),
    ))
}
