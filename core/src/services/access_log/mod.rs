//! Access audit log service module
//!
//! Read views over the append-only redemption ledger plus the employee
//! approval workflow. Rows are written by the redemption engine; nothing
//! here creates or deletes them.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccessLogService, AccessStats};
