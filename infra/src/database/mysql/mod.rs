//! MySQL repository implementations.

mod access_log_repository_impl;
mod employment_repository_impl;
mod redemption_store_impl;
mod user_repository_impl;
mod verification_code_repository_impl;

pub use access_log_repository_impl::MySqlAccessLogRepository;
pub use employment_repository_impl::MySqlEmploymentRepository;
pub use redemption_store_impl::MySqlRedemptionStore;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;
