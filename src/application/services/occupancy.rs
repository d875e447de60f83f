//! Occupancy reconciliation
//!
//! Ingests per-space sensor samples and recomputes facility availability
//! from the census. Once a facility has reported, the sensor view is the
//! only authority over its counter.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::inventory::InventoryLedger;
use crate::domain::OccupancySample;
use crate::infrastructure::{LockManager, Storage};
use crate::notifications::{Event, OccupancyChangedEvent, SharedEventBus};
use crate::shared::{DomainError, DomainResult};

/// Service for sensor-driven occupancy
pub struct OccupancyService {
    storage: Arc<dyn Storage>,
    locks: Arc<LockManager>,
    event_bus: SharedEventBus,
}

impl OccupancyService {
    pub fn new(
        storage: Arc<dyn Storage>,
        locks: Arc<LockManager>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            storage,
            locks,
            event_bus,
        }
    }

    /// Record a sensor sample and reconcile the facility's availability.
    /// Samples are last-write-wins per space.
    pub async fn report(
        &self,
        facility_id: i32,
        space_number: i32,
        occupied: bool,
        battery_level: Option<f64>,
    ) -> DomainResult<i32> {
        let _facility_guard = self.locks.lock_facility(facility_id).await?;

        let mut facility = self
            .storage
            .get_facility(facility_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Facility",
                field: "id",
                value: facility_id.to_string(),
            })?;
        if space_number < 1 || space_number > facility.total_spaces {
            return Err(DomainError::InvalidInput(format!(
                "space {} is out of range for facility {}",
                space_number, facility_id
            )));
        }

        let sample = OccupancySample::new(facility_id, space_number, occupied, battery_level);
        if sample.battery_low() {
            warn!(facility_id, space_number, battery = ?battery_level, "sensor battery low");
        }
        self.storage.upsert_occupancy_sample(sample).await?;

        let occupied_count = self.storage.count_occupied(facility_id).await?;
        InventoryLedger::reconcile(&mut facility, occupied_count);
        let available = facility.available_spaces;
        self.storage.update_facility(facility).await?;

        info!(
            facility_id,
            space_number, occupied, available, "occupancy reconciled"
        );
        self.event_bus
            .publish(Event::OccupancyChanged(OccupancyChangedEvent {
                facility_id,
                space_number,
                occupied,
                available_spaces: available,
                timestamp: Utc::now(),
            }));

        Ok(available)
    }

    /// Current samples for a facility, ordered by space number.
    pub async fn samples(&self, facility_id: i32) -> DomainResult<Vec<OccupancySample>> {
        self.storage.list_occupancy_for_facility(facility_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
