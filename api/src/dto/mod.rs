//! Request and response data transfer objects.

pub mod access_log;
pub mod auth;
pub mod employment;
pub mod user;
pub mod verification_code;
