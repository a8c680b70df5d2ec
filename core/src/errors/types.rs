//! Domain-specific error types for authentication and validation
//!
//! This module provides error type definitions for authentication, token
//! management, and validation operations. HTTP status mapping happens in the
//! presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("A user with this email is already registered")]
    EmailAlreadyRegistered,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("User account is inactive")]
    AccountInactive,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Password hashing failed")]
    PasswordHashingFailed,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Wrong token type for this operation")]
    WrongTokenType,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid date: {field}")]
    InvalidDate { field: String },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },
}
