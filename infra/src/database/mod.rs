//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository pattern implementations
//! - The transactional redemption store

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
