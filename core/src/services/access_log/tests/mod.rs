//! Tests for the access log service.

mod service_tests;
