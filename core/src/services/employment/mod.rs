//! Employment record service module
//!
//! Owner-scoped CRUD over employment records plus the current/ended
//! transitions. The redemption engine reads these records through its own
//! store; nothing here is reachable from employers.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CreateEmploymentInput, EmploymentService, UpdateEmploymentInput};
