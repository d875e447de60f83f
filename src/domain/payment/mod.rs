//! Payment ledger aggregate

pub mod model;

pub use model::{Payment, PaymentMethod};
