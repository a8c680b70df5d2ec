//! Token service module
//!
//! Stateless JWT issuance and verification: HS256-signed access and refresh
//! tokens carrying the user's id and role. There is no server-side token
//! store; logout is a client-side concern.

mod service;

pub use service::TokenService;
