//! Employment repository module.

mod r#trait;
pub use r#trait::EmploymentRepository;

mod mock;
pub use mock::MockEmploymentRepository;
