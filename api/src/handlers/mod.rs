//! Request handling helpers shared by the route modules.

pub mod error;
