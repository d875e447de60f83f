//! Occupancy sensor aggregate

pub mod model;

pub use model::OccupancySample;
