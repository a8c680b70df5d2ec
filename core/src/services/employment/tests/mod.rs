//! Tests for the employment service.

mod service_tests;
