use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use sl_core::services::access_log::AccessLogService;
use sl_core::services::auth::AuthService;
use sl_core::services::employment::EmploymentService;
use sl_core::services::redemption::RedemptionService;
use sl_core::services::token::TokenService;
use sl_core::services::verification::VerificationCodeService;
use sl_infra::database::DatabasePool;
use sl_infra::{
    MySqlAccessLogRepository, MySqlEmploymentRepository, MySqlRedemptionStore,
    MySqlUserRepository, MySqlVerificationCodeRepository,
};
use sl_shared::config::AppConfig;

use sl_api::app::{create_app, AppState};

/// Interval between expiry sweeps; redemption also expires codes lazily,
/// so the sweep only keeps listings tidy
const EXPIRE_SWEEP_INTERVAL_SECS: u64 = 15 * 60;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting SunLighter API Server");

    // Load configuration
    let config = AppConfig::from_env();
    if config.jwt.is_using_default_secret() && config.environment.is_production() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    // Database pool and repositories
    let db = DatabasePool::new(&config.database).await?;
    db.health_check().await?;
    let pool = db.pool();

    let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
    let employment_repo = Arc::new(MySqlEmploymentRepository::new(pool.clone()));
    let code_repo = Arc::new(MySqlVerificationCodeRepository::new(pool.clone()));
    let access_log_repo = Arc::new(MySqlAccessLogRepository::new(pool.clone()));
    let redemption_store = Arc::new(MySqlRedemptionStore::new(pool));

    // Services
    let token_service = Arc::new(TokenService::new(config.jwt.clone()));
    let auth_service = Arc::new(AuthService::new(user_repo, token_service.clone()));
    let employment_service = Arc::new(EmploymentService::new(employment_repo.clone()));
    let verification_service = Arc::new(VerificationCodeService::new(
        code_repo.clone(),
        employment_repo,
        config.verification.clone(),
    ));
    let redemption_service = Arc::new(RedemptionService::new(redemption_store));
    let access_log_service = Arc::new(AccessLogService::new(access_log_repo, code_repo));

    // Periodic expiry sweep
    let sweeper = verification_service.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(EXPIRE_SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            if let Err(e) = sweeper.expire_sweep().await {
                log::error!("Expiry sweep failed: {}", e);
            }
        }
    });

    let app_state = web::Data::new(AppState {
        auth_service,
        employment_service,
        verification_service,
        redemption_service,
        access_log_service,
    });
    let token_data = web::Data::new(token_service);

    HttpServer::new(move || create_app(app_state.clone(), token_data.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
