//! Access log response DTOs.
//!
//! Log rows and stats serialize straight from the core types; the approval
//! endpoints answer with a short confirmation message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecisionResponse {
    pub message: String,
}

impl ApprovalDecisionResponse {
    pub fn approved() -> Self {
        Self {
            message: "Access request approved".to_string(),
        }
    }

    pub fn denied() -> Self {
        Self {
            message: "Access request denied".to_string(),
        }
    }
}
