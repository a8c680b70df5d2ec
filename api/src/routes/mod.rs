//! Route handlers grouped by resource.

pub mod access_logs;
pub mod auth;
pub mod employments;
pub mod verification_codes;
