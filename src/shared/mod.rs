//! Shared types and helpers

pub mod errors;
pub mod geo;
pub mod money;

pub use errors::{DomainError, DomainResult};
pub use money::Money;
