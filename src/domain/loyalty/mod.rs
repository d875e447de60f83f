//! Loyalty aggregate

pub mod model;

pub use model::{LoyaltyProgram, Redemption, POINTS_MILLI_SCALE};
