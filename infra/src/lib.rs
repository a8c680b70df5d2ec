//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SunLighter
//! application, following Clean Architecture principles. It provides the
//! MySQL-backed implementations of the repository traits defined in
//! `sl_core` plus connection pool management.

pub mod database;

pub use database::connection::DatabasePool;
pub use database::mysql::{
    MySqlAccessLogRepository, MySqlEmploymentRepository, MySqlRedemptionStore,
    MySqlUserRepository, MySqlVerificationCodeRepository,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
