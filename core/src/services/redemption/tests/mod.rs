//! Tests for the redemption engine.

mod service_tests;
