//! Notification events
//!
//! Defines all event types emitted by the booking and settlement services.
//! Delivery (push, email, UI feeds) is a downstream concern of subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Reservation booked, payment outstanding
    ReservationCreated(ReservationCreatedEvent),
    /// Payment settled
    PaymentCompleted(PaymentCompletedEvent),
    /// Payment attempt declined
    PaymentFailed(PaymentFailedEvent),
    /// Reservation cancelled, possibly with a refund
    ReservationCancelled(ReservationCancelledEvent),
    /// Reservation end time moved out
    ReservationExtended(ReservationExtendedEvent),
    /// Admin approved a facility listing
    FacilityApproved(FacilityVerifiedEvent),
    /// Admin rejected a facility listing
    FacilityRejected(FacilityVerifiedEvent),
    /// Reward points converted to wallet credit
    PointsRedeemed(PointsRedeemedEvent),
    /// Sensor census changed a facility's availability
    OccupancyChanged(OccupancyChangedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationCreated(_) => "reservation_created",
            Event::PaymentCompleted(_) => "payment_completed",
            Event::PaymentFailed(_) => "payment_failed",
            Event::ReservationCancelled(_) => "reservation_cancelled",
            Event::ReservationExtended(_) => "reservation_extended",
            Event::FacilityApproved(_) => "facility_approved",
            Event::FacilityRejected(_) => "facility_rejected",
            Event::PointsRedeemed(_) => "points_redeemed",
            Event::OccupancyChanged(_) => "occupancy_changed",
        }
    }

    /// The user this event should be delivered to, if any
    pub fn recipient_user_id(&self) -> Option<i32> {
        match self {
            Event::ReservationCreated(e) => Some(e.user_id),
            Event::PaymentCompleted(e) => Some(e.user_id),
            Event::PaymentFailed(e) => Some(e.user_id),
            Event::ReservationCancelled(e) => Some(e.user_id),
            Event::ReservationExtended(e) => Some(e.user_id),
            Event::FacilityApproved(e) => Some(e.owner_id),
            Event::FacilityRejected(e) => Some(e.owner_id),
            Event::PointsRedeemed(e) => Some(e.user_id),
            Event::OccupancyChanged(_) => None,
        }
    }
}

/// Reservation created event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreatedEvent {
    pub reservation_id: i32,
    pub user_id: i32,
    pub facility_id: i32,
    /// Amount due, in minor currency units
    pub amount_due: i64,
    pub timestamp: DateTime<Utc>,
}

/// Payment completed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCompletedEvent {
    pub reservation_id: i32,
    pub user_id: i32,
    pub transaction_id: String,
    pub method: String,
    pub amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Payment failed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentFailedEvent {
    pub reservation_id: i32,
    pub user_id: i32,
    pub method: String,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Reservation cancelled event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCancelledEvent {
    pub reservation_id: i32,
    pub user_id: i32,
    pub facility_id: i32,
    /// Refund credited to the wallet, 0 for unpaid bookings
    pub refund_amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Reservation extended event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationExtendedEvent {
    pub reservation_id: i32,
    pub user_id: i32,
    pub new_end_time: DateTime<Utc>,
    pub added_cost: i64,
    pub timestamp: DateTime<Utc>,
}

/// Facility verification decision, sent to the owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityVerifiedEvent {
    pub facility_id: i32,
    pub owner_id: i32,
    pub facility_name: String,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Points redeemed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsRedeemedEvent {
    pub user_id: i32,
    pub vouchers: i64,
    pub points_spent: i64,
    pub wallet_credit: i64,
    pub timestamp: DateTime<Utc>,
}

/// Occupancy changed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyChangedEvent {
    pub facility_id: i32,
    pub space_number: i32,
    pub occupied: bool,
    pub available_spaces: i32,
    pub timestamp: DateTime<Utc>,
}

/// Envelope with a unique id and publish timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_type_tag() {
        let event = Event::PaymentCompleted(PaymentCompletedEvent {
            reservation_id: 1,
            user_id: 3,
            transaction_id: "txn_abc".to_string(),
            method: "wallet".to_string(),
            amount: 8000,
            timestamp: Utc::now(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PaymentCompleted");
        assert_eq!(json["data"]["amount"], 8000);
    }

    #[test]
    fn recipient_routing() {
        let event = Event::FacilityApproved(FacilityVerifiedEvent {
            facility_id: 1,
            owner_id: 2,
            facility_name: "Harbour Gate Parking".to_string(),
            notes: None,
            timestamp: Utc::now(),
        });
        assert_eq!(event.recipient_user_id(), Some(2));
        assert_eq!(event.event_type(), "facility_approved");

        let event = Event::OccupancyChanged(OccupancyChangedEvent {
            facility_id: 1,
            space_number: 4,
            occupied: true,
            available_spaces: 19,
            timestamp: Utc::now(),
        });
        assert_eq!(event.recipient_user_id(), None);
    }
}
