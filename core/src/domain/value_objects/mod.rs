//! Value objects used by the domain services.

pub mod verification_outcome;

pub use verification_outcome::{DisclosureSnapshot, RequestMetadata, VerificationOutcome};
