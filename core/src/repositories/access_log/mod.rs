//! Access log repository module.

mod r#trait;
pub use r#trait::AccessLogRepository;

mod mock;
pub use mock::MockAccessLogRepository;
