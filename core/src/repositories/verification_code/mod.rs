//! Verification code repository module.

mod r#trait;
pub use r#trait::VerificationCodeRepository;

mod mock;
pub use mock::MockVerificationCodeRepository;
