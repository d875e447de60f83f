//! Pricing engine
//!
//! Pure cost computation: duration pricing, EV surcharge, revenue split.
//! All arithmetic is integer minor-unit math, rounded half-up once per
//! component.

use crate::domain::Facility;
use crate::shared::{DomainError, DomainResult, Money};
use chrono::{DateTime, Utc};

/// Cost breakdown for a booking interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub duration_minutes: i64,
    pub parking_cost: Money,
    pub ev_cost: Money,
    pub total_cost: Money,
    /// Owner's share, net of the platform cut
    pub owner_earnings: Money,
    pub platform_earnings: Money,
}

/// Stateless pricing computations
pub struct PricingEngine;

impl PricingEngine {
    /// Quote a booking of `facility` over `[start, end)`.
    pub fn quote(
        facility: &Facility,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        use_ev_charging: bool,
    ) -> DomainResult<Quote> {
        if end <= start {
            return Err(DomainError::InvalidDuration);
        }
        let minutes = (end - start).num_minutes();
        Ok(Self::quote_minutes(facility, minutes, use_ev_charging))
    }

    /// Quote `minutes` of parking; used directly by extensions.
    pub fn quote_minutes(facility: &Facility, minutes: i64, use_ev_charging: bool) -> Quote {
        let parking_cost = Money::per_hour_for_minutes(facility.price_per_hour, minutes);
        let ev_cost = if use_ev_charging && facility.has_ev_charging {
            Money::per_hour_for_minutes(facility.ev_price_per_hour, minutes)
        } else {
            Money::ZERO
        };
        let total_cost = parking_cost + ev_cost;

        // Platform cut rounds half-up; the owner takes the remainder so the
        // two always sum to the total exactly.
        let platform_earnings = total_cost.mul_bps(facility.revenue_share_bps);
        let owner_earnings = total_cost - platform_earnings;

        Quote {
            duration_minutes: minutes,
            parking_cost,
            ev_cost,
            total_cost,
            owner_earnings,
            platform_earnings,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VerificationStatus;
    use chrono::Duration;

    fn sample_facility() -> Facility {
        Facility {
            id: 1,
            owner_id: 2,
            name: "Harbour Gate Parking".into(),
            address: "Beach Road".into(),
            latitude: 8.7679,
            longitude: 78.2218,
            total_spaces: 20,
            available_spaces: 20,
            price_per_hour: Money::from_major(40),
            has_ev_charging: true,
            ev_price_per_hour: Money::from_major(20),
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
    fn two_hours_at_forty_splits_fifteen_percent() {
        let f = sample_facility();
        let start = Utc::now();
        let q = PricingEngine::quote(&f, start, start + Duration::hours(2), false).unwrap();
        assert_eq!(q.duration_minutes, 120);
        assert_eq!(q.parking_cost, Money::from_major(80));
        assert_eq!(q.ev_cost, Money::ZERO);
        assert_eq!(q.total_cost, Money::from_major(80));
        assert_eq!(q.platform_earnings, Money::from_major(12));
        assert_eq!(q.owner_earnings, Money::from_major(68));
    }

    #[test]
    fn ev_surcharge_applies_only_when_available() {
        let mut f = sample_facility();
        let start = Utc::now();
        let end = start + Duration::hours(1);

        let q = PricingEngine::quote(&f, start, end, true).unwrap();
        assert_eq!(q.ev_cost, Money::from_major(20));
        assert_eq!(q.total_cost, Money::from_major(60));

        f.has_ev_charging = false;
        let q = PricingEngine::quote(&f, start, end, true).unwrap();
        assert_eq!(q.ev_cost, Money::ZERO);
        assert_eq!(q.total_cost, Money::from_major(40));
    }

    #[test]
    fn split_always_sums_to_total() {
        let mut f = sample_facility();
        f.price_per_hour = Money::from_minor(3_333);
        for bps in [1, 333, 1500, 9_999] {
            f.revenue_share_bps = bps;
            let q = PricingEngine::quote_minutes(&f, 97, false);
            assert_eq!(q.owner_earnings + q.platform_earnings, q.total_cost);
        }
    }

    #[test]
    fn zero_or_negative_duration_rejected() {
        let f = sample_facility();
        let start = Utc::now();
        assert!(matches!(
            PricingEngine::quote(&f, start, start, false),
            Err(DomainError::InvalidDuration)
        ));
        assert!(matches!(
            PricingEngine::quote(&f, start, start - Duration::minutes(5), false),
            Err(DomainError::InvalidDuration)
        ));
    }

    #[test]
    fn partial_hour_prorates() {
        let f = sample_facility();
        // 30 minutes at 40/hr = 20
        let q = PricingEngine::quote_minutes(&f, 30, false);
        assert_eq!(q.parking_cost, Money::from_major(20));
    }
}
