//! Inventory ledger
//!
//! Single authority for the `available_spaces` counter. All three operations
//! mutate a staged facility clone; the caller holds the facility lock and
//! writes back on success.

use crate::domain::Facility;
use crate::shared::{DomainError, DomainResult};

pub struct InventoryLedger;

impl InventoryLedger {
    /// Claim one space for a new booking.
    ///
    /// For sensor-managed facilities the check still applies but the counter
    /// is left to reconciliation.
    pub fn reserve(facility: &mut Facility) -> DomainResult<()> {
        if facility.available_spaces <= 0 {
            return Err(DomainError::NoAvailability);
        }
        facility.take_space();
        Ok(())
    }

    /// Return a space on cancellation. Clamped to the physical total, no-op
    /// on sensor-managed counters.
    pub fn release(facility: &mut Facility) {
        facility.release_space();
    }

    /// Overwrite availability from a sensor census and mark the facility
    /// sensor-managed.
    pub fn reconcile(facility: &mut Facility, occupied: i32) {
        facility.reconcile_occupancy(occupied);
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VerificationStatus;
    use crate::shared::Money;
    use chrono::Utc;

    fn sample_facility(available: i32) -> Facility {
        Facility {
            id: 1,
            owner_id: 2,
            name: "Harbour Gate Parking".into(),
            address: "Beach Road".into(),
            latitude: 8.7679,
            longitude: 78.2218,
            total_spaces: 10,
            available_spaces: available,
            price_per_hour: Money::from_major(40),
            has_ev_charging: false,
            ev_price_per_hour: Money::ZERO,
            is_public: true,
            revenue_share_bps: 1500,
            verification: VerificationStatus::Approved,
            verification_notes: None,
            owner_earnings: Money::ZERO,
            platform_earnings: Money::ZERO,
            sensor_managed: false,
            features: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reserve_decrements_until_empty() {
        let mut f = sample_facility(2);
        InventoryLedger::reserve(&mut f).unwrap();
        InventoryLedger::reserve(&mut f).unwrap();
        assert_eq!(f.available_spaces, 0);
        assert!(matches!(
            InventoryLedger::reserve(&mut f),
            Err(DomainError::NoAvailability)
        ));
    }

    #[test]
    fn release_never_exceeds_total() {
        let mut f = sample_facility(10);
        InventoryLedger::release(&mut f);
        assert_eq!(f.available_spaces, 10);
    }

    #[test]
    fn sensor_managed_reserve_checks_without_decrementing() {
        let mut f = sample_facility(10);
        InventoryLedger::reconcile(&mut f, 4);
        assert_eq!(f.available_spaces, 6);

        InventoryLedger::reserve(&mut f).unwrap();
        assert_eq!(f.available_spaces, 6);

        InventoryLedger::reconcile(&mut f, 10);
        assert!(matches!(
            InventoryLedger::reserve(&mut f),
            Err(DomainError::NoAvailability)
        ));
    }
}
