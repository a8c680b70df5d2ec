//! Redemption engine module
//!
//! The single synchronous operation employers call: present a code string,
//! get back a disclosure snapshot or a rejection. Every attempt - either
//! way - appends exactly one access log row.

mod service;

#[cfg(test)]
mod tests;

pub use service::RedemptionService;
