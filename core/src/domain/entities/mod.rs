//! Domain entities representing core business objects.

pub mod access_log;
pub mod employment;
pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use access_log::{AccessLog, ApprovalStatus};
pub use employment::{Employment, EmploymentStatus, EmploymentType};
pub use token::{Claims, TokenPair, TokenType};
pub use user::{User, UserType};
pub use verification_code::{
    CodeStatus, VerificationCode, CODE_PREFIX, CODE_SEGMENTS, CODE_SEGMENT_LENGTH,
};
