//! Redemption store module.

mod r#trait;
pub use r#trait::{CodeMutation, RedemptionRecord, RedemptionStore};

mod mock;
pub use mock::MockRedemptionStore;
