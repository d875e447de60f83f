//! Reservation domain entity

use chrono::{DateTime, Utc};

use crate::shared::{DomainError, DomainResult, Money};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Booked, payment outstanding
    Pending,
    /// Paid and settled
    Completed,
    /// Last payment attempt declined; retryable
    Failed,
    /// Fully refunded outside the cancellation path
    Refunded,
    /// Cancelled; terminal
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "refunded" => Self::Refunded,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booking of one parking space for a time interval.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub facility_id: i32,
    /// Space assigned at booking time (1-based)
    pub space_number: i32,
    pub vehicle_type: String,
    pub license_plate: String,
    pub use_ev_charging: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub parking_cost: Money,
    pub ev_cost: Money,
    pub total_cost: Money,
    /// Owner's share of total_cost, net of the platform cut
    pub owner_earnings: Money,
    pub platform_earnings: Money,
    /// Amounts frozen at settlement. Extensions grow the live components
    /// without collecting money, so refunds and earnings reversals work
    /// from these instead.
    pub settled_total: Money,
    pub settled_owner_earnings: Money,
    pub settled_platform_earnings: Money,
    pub status: ReservationStatus,
    /// Settlement method, recorded on successful payment
    pub payment_method: Option<String>,
    /// When payment settled
    pub paid_at: Option<DateTime<Utc>>,
    /// When the space was vacated, stamped at settlement or cancellation
    pub actual_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Booked duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Mark paid. Valid from Pending or Failed; Completed yields
    /// AlreadySettled, terminal states are rejected.
    pub fn mark_paid(&mut self, method: &str, at: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Pending | ReservationStatus::Failed => {
                self.status = ReservationStatus::Completed;
                self.payment_method = Some(method.to_string());
                self.paid_at = Some(at);
                self.actual_end = Some(at);
                self.settled_total = self.total_cost;
                self.settled_owner_earnings = self.owner_earnings;
                self.settled_platform_earnings = self.platform_earnings;
                Ok(())
            }
            ReservationStatus::Completed => Err(DomainError::AlreadySettled),
            other => Err(DomainError::InvalidInput(format!(
                "cannot pay a {} reservation",
                other
            ))),
        }
    }

    /// Record a declined payment attempt.
    pub fn mark_failed(&mut self) {
        if matches!(self.status, ReservationStatus::Pending) {
            self.status = ReservationStatus::Failed;
        }
    }

    /// Cancel from any non-terminal status, stamping the vacated time.
    pub fn mark_cancelled(&mut self, at: DateTime<Utc>) -> DomainResult<ReservationStatus> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidInput(
                "reservation is already cancelled".into(),
            ));
        }
        let prior = self.status;
        self.status = ReservationStatus::Cancelled;
        self.actual_end = Some(at);
        Ok(prior)
    }

    /// Whether the booking may be extended right now.
    pub fn can_extend(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            ReservationStatus::Completed => true,
            ReservationStatus::Pending => self.end_time > now,
            _ => false,
        }
    }

    /// Fold an extension quote into the stored cost components and move the
    /// end time out.
    pub fn apply_extension(
        &mut self,
        new_end: DateTime<Utc>,
        parking_cost: Money,
        ev_cost: Money,
        owner_earnings: Money,
        platform_earnings: Money,
    ) {
        self.end_time = new_end;
        self.parking_cost += parking_cost;
        self.ev_cost += ev_cost;
        self.total_cost += parking_cost + ev_cost;
        self.owner_earnings += owner_earnings;
        self.platform_earnings += platform_earnings;
    }
}

// ── Tests ──────────────────────────────────────────────────────
