//! Verification code lifecycle module
//!
//! Owns code creation (with store-backed uniqueness retry), revocation, and
//! the periodic expiry sweep. Redemption lives in the `redemption` module.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CreateCodeInput, VerificationCodeService};
