//! # SunLighter Core
//!
//! Core business logic and domain layer for the SunLighter backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AccessLog, ApprovalStatus, Claims, CodeStatus, Employment, EmploymentStatus, EmploymentType,
    TokenPair, TokenType, User, UserType, VerificationCode,
};
pub use domain::value_objects::{DisclosureSnapshot, RequestMetadata, VerificationOutcome};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    AccessLogRepository, CodeMutation, EmploymentRepository, RedemptionRecord, RedemptionStore,
    UserRepository, VerificationCodeRepository,
};
pub use services::{
    AccessLogService, AccessStats, AuthService, CreateCodeInput, CreateEmploymentInput,
    EmploymentService, RedemptionService, RegisterInput, TokenService, UpdateEmploymentInput,
    VerificationCodeService,
};
