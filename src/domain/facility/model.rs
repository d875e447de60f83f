//! Parking facility domain entity

use chrono::{DateTime, Utc};

use crate::shared::Money;

/// Admin verification state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Awaiting admin review, hidden from default listings
    Pending,
    /// Approved, bookable
    Approved,
    /// Rejected by admin
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parking facility listed by an owner.
#[derive(Debug, Clone)]
pub struct Facility {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_spaces: i32,
    /// Spaces currently bookable; 0 <= available <= total
    pub available_spaces: i32,
    /// Hourly parking rate
    pub price_per_hour: Money,
    pub has_ev_charging: bool,
    /// Hourly EV charging surcharge
    pub ev_price_per_hour: Money,
    pub is_public: bool,
    /// Platform cut in basis points (1500 = 15%)
    pub revenue_share_bps: u32,
    pub verification: VerificationStatus,
    pub verification_notes: Option<String>,
    /// Lifetime owner earnings, net of the platform cut
    pub owner_earnings: Money,
    /// Lifetime platform earnings
    pub platform_earnings: Money,
    /// Once true, sensor reconciliation is the sole authority over
    /// `available_spaces`
    pub sensor_managed: bool,
    /// Free-form amenity metadata (covered, security, valet, ...)
    pub features: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Facility {
    pub fn is_bookable(&self) -> bool {
        self.verification == VerificationStatus::Approved
    }

    /// Decrement availability for a new booking. Caller must have checked
    /// availability first; clamps at 0 regardless.
    pub fn take_space(&mut self) {
        if !self.sensor_managed {
            self.available_spaces = (self.available_spaces - 1).max(0);
        }
    }

    /// Return a space on cancellation, clamped to the physical total.
    pub fn release_space(&mut self) {
        if !self.sensor_managed {
            self.available_spaces = (self.available_spaces + 1).min(self.total_spaces);
        }
    }

    /// Overwrite availability from a sensor census and hand the counter over
    /// to reconciliation.
    pub fn reconcile_occupancy(&mut self, occupied: i32) {
        self.sensor_managed = true;
        self.available_spaces = (self.total_spaces - occupied).clamp(0, self.total_spaces);
    }

    pub fn approve(&mut self, notes: Option<String>) {
        self.verification = VerificationStatus::Approved;
        self.verification_notes = notes;
    }

    pub fn reject(&mut self, notes: Option<String>) {
        self.verification = VerificationStatus::Rejected;
        self.verification_notes = notes;
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_facility() -> Facility {
        Facility {
            id: 1,
            owner_id: 10,
            name: "Harbour Gate Parking".into(),
            address: "Beach Road, Tuticorin".into(),
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
            features: serde_json::json!({"covered": true}),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn take_and_release_stay_in_bounds() {
        let mut f = sample_facility();
        f.available_spaces = 1;
        f.take_space();
        assert_eq!(f.available_spaces, 0);
        f.take_space();
        assert_eq!(f.available_spaces, 0);
        f.release_space();
        assert_eq!(f.available_spaces, 1);
        f.available_spaces = f.total_spaces;
        f.release_space();
        assert_eq!(f.available_spaces, f.total_spaces);
    }

    #[test]
    fn sensor_managed_counter_ignores_bookings() {
        let mut f = sample_facility();
        f.reconcile_occupancy(5);
        assert!(f.sensor_managed);
        assert_eq!(f.available_spaces, 15);
        f.take_space();
        f.release_space();
        assert_eq!(f.available_spaces, 15);
    }

    #[test]
    fn reconcile_clamps_occupied_count() {
        let mut f = sample_facility();
        f.reconcile_occupancy(25);
        assert_eq!(f.available_spaces, 0);
        f.reconcile_occupancy(-3);
        assert_eq!(f.available_spaces, f.total_spaces);
    }

    #[test]
    fn only_approved_is_bookable() {
        let mut f = sample_facility();
        assert!(f.is_bookable());
        f.reject(Some("no fire exit".into()));
        assert!(!f.is_bookable());
        assert_eq!(f.verification, VerificationStatus::Rejected);
        f.approve(None);
        assert!(f.is_bookable());
    }

    #[test]
    fn verification_status_roundtrip() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Approved,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(VerificationStatus::from_str(status.as_str()), status);
        }
        assert_eq!(
            VerificationStatus::from_str("garbage"),
            VerificationStatus::Pending
        );
    }
}
