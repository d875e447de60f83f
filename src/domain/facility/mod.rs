//! Facility aggregate

pub mod model;

pub use model::{Facility, VerificationStatus};
