//! Tests for the verification code lifecycle service.
