//! Occupancy sensor domain entity

use chrono::{DateTime, Utc};

/// Latest sample from one space's occupancy sensor. Keyed by
/// (facility_id, space_number); last write wins.
#[derive(Debug, Clone)]
pub struct OccupancySample {
    pub facility_id: i32,
    /// 1-based space index
    pub space_number: i32,
    pub occupied: bool,
    /// Sensor battery percentage, if reported
    pub battery_level: Option<f64>,
    pub reported_at: DateTime<Utc>,
}

impl OccupancySample {
    pub fn new(
        facility_id: i32,
        space_number: i32,
        occupied: bool,
        battery_level: Option<f64>,
    ) -> Self {
        Self {
            facility_id,
            space_number,
            occupied,
            battery_level,
            reported_at: Utc::now(),
        }
    }

    /// Battery at or below 20% wants a maintenance visit.
    pub fn battery_low(&self) -> bool {
        self.battery_level.is_some_and(|b| b <= 20.0)
    }
}

// ── Tests ──────────────────────────────────────────────────────
