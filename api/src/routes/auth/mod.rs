//! Authentication route handlers
//!
//! - Registration with auto-login
//! - Email/password login
//! - Token refresh
//! - Current-user lookup and logout

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
