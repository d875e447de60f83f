//! Reservation lifecycle
//!
//! Booking, settlement, extension and cancellation. Every operation stages
//! its changes on cloned entities under the lock manager (reservation, then
//! facility, then user) and writes back only when the whole step succeeded.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use super::inventory::InventoryLedger;
use super::loyalty::LoyaltyService;
use super::payment::PaymentService;
use super::pricing::PricingEngine;
use crate::domain::{
    Payment, PaymentMethod, Reservation, ReservationStatus,
};
use crate::infrastructure::{LockManager, Storage};
use crate::notifications::{
    Event, PaymentCompletedEvent, PaymentFailedEvent, ReservationCancelledEvent,
    ReservationCreatedEvent, ReservationExtendedEvent, SharedEventBus,
};
use crate::shared::{DomainError, DomainResult, Money};

/// Booking request accepted by [`ReservationService::create`].
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub user_id: i32,
    pub facility_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub vehicle_type: String,
    pub license_plate: String,
    pub use_ev_charging: bool,
}

/// Service for the reservation state machine
pub struct ReservationService {
    storage: Arc<dyn Storage>,
    locks: Arc<LockManager>,
    event_bus: SharedEventBus,
    payments: Arc<PaymentService>,
    loyalty: Arc<LoyaltyService>,
}

impl ReservationService {
    pub fn new(
        storage: Arc<dyn Storage>,
        locks: Arc<LockManager>,
        event_bus: SharedEventBus,
        payments: Arc<PaymentService>,
        loyalty: Arc<LoyaltyService>,
    ) -> Self {
        Self {
            storage,
            locks,
            event_bus,
            payments,
            loyalty,
        }
    }

    /// Book a space. The reservation starts `Pending`; payment is a separate
    /// step.
    pub async fn create(&self, request: BookingRequest) -> DomainResult<Reservation> {
        if request.vehicle_type.trim().is_empty() || request.license_plate.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "vehicle type and license plate are required".to_string(),
            ));
        }

        let user = self
            .storage
            .get_user(request.user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: request.user_id.to_string(),
            })?;

        let _facility_guard = self.locks.lock_facility(request.facility_id).await?;

        let mut facility = self
            .storage
            .get_facility(request.facility_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Facility",
                field: "id",
                value: request.facility_id.to_string(),
            })?;
        if !facility.is_bookable() {
            return Err(DomainError::InvalidInput(
                "facility is not approved for booking".to_string(),
            ));
        }

        let quote = PricingEngine::quote(
            &facility,
            request.start_time,
            request.end_time,
            request.use_ev_charging,
        )?;

        let space_number = self.pick_space(&facility).await?;
        InventoryLedger::reserve(&mut facility)?;

        let reservation = Reservation {
            id: self.storage.next_reservation_id().await,
            user_id: user.id,
            facility_id: facility.id,
            space_number,
            vehicle_type: request.vehicle_type,
            license_plate: request.license_plate,
            use_ev_charging: request.use_ev_charging,
            start_time: request.start_time,
            end_time: request.end_time,
            parking_cost: quote.parking_cost,
            ev_cost: quote.ev_cost,
            total_cost: quote.total_cost,
            owner_earnings: quote.owner_earnings,
            platform_earnings: quote.platform_earnings,
            settled_total: Money::ZERO,
            settled_owner_earnings: Money::ZERO,
            settled_platform_earnings: Money::ZERO,
            status: ReservationStatus::Pending,
            payment_method: None,
            paid_at: None,
            actual_end: None,
            created_at: Utc::now(),
        };

        let reservation = self.storage.save_reservation(reservation).await?;
        self.storage.update_facility(facility).await?;

        info!(
            reservation_id = reservation.id,
            user_id = reservation.user_id,
            facility_id = reservation.facility_id,
            space = reservation.space_number,
            amount_due = %reservation.total_cost,
            "reservation created"
        );
        self.event_bus
            .publish(Event::ReservationCreated(ReservationCreatedEvent {
                reservation_id: reservation.id,
                user_id: reservation.user_id,
                facility_id: reservation.facility_id,
                amount_due: reservation.total_cost.minor(),
                timestamp: Utc::now(),
            }));

        Ok(reservation)
    }

    /// Settle an outstanding reservation. Valid from `Pending` or `Failed`;
    /// a decline marks the reservation `Failed` and may be retried.
    pub async fn settle(
        &self,
        reservation_id: i32,
        method: PaymentMethod,
    ) -> DomainResult<Payment> {
        if method == PaymentMethod::Refund {
            return Err(DomainError::InvalidInput(
                "refund is not a settlement method".to_string(),
            ));
        }

        let _reservation_guard = self.locks.lock_reservation(reservation_id).await?;

        let mut reservation = self.get_reservation(reservation_id).await?;

        let _facility_guard = self.locks.lock_facility(reservation.facility_id).await?;
        let _user_guard = self.locks.lock_user(reservation.user_id).await?;

        let mut facility = self
            .storage
            .get_facility(reservation.facility_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Facility",
                field: "id",
                value: reservation.facility_id.to_string(),
            })?;
        let mut user = self
            .storage
            .get_user(reservation.user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: reservation.user_id.to_string(),
            })?;

        let amount = reservation.total_cost;
        let now = Utc::now();
        reservation.mark_paid(method.as_str(), now)?;

        if let Err(err) = self.payments.charge(&mut user, method, amount) {
            if matches!(&err, DomainError::GatewayDeclined) {
                // The decline is recorded; validation failures leave the
                // reservation Pending.
                let mut declined = self.get_reservation(reservation_id).await?;
                declined.mark_failed();
                self.storage.update_reservation(declined).await?;
                warn!(reservation_id, %method, "payment declined by gateway");
                self.event_bus
                    .publish(Event::PaymentFailed(PaymentFailedEvent {
                        reservation_id,
                        user_id: user.id,
                        method: method.as_str().to_string(),
                        reason: err.to_string(),
                        timestamp: now,
                    }));
            }
            return Err(err);
        }

        let earned = self.loyalty.accrue(&mut user, amount).await?;
        facility.owner_earnings += reservation.owner_earnings;
        facility.platform_earnings += reservation.platform_earnings;

        let payment = Payment::new(user.id, Some(reservation_id), amount, method);

        self.storage.save_payment(payment.clone()).await?;
        self.storage.update_user(user).await?;
        self.storage.update_facility(facility).await?;
        self.storage.update_reservation(reservation.clone()).await?;

        info!(
            reservation_id,
            transaction_id = %payment.id,
            %method,
            %amount,
            points_earned = earned,
            "payment completed"
        );
        self.event_bus
            .publish(Event::PaymentCompleted(PaymentCompletedEvent {
                reservation_id,
                user_id: payment.user_id,
                transaction_id: payment.id.clone(),
                method: method.as_str().to_string(),
                amount: amount.minor(),
                timestamp: now,
            }));

        Ok(payment)
    }

    /// Move the end time out by whole hours. The space is already held, so
    /// availability is checked but not decremented; the added cost is folded
    /// into the reservation and collected with the next settlement cycle.
    pub async fn extend(
        &self,
        reservation_id: i32,
        additional_hours: i64,
    ) -> DomainResult<Reservation> {
        if additional_hours <= 0 {
            return Err(DomainError::InvalidInput(
                "extension must add at least one hour".to_string(),
            ));
        }

        let _reservation_guard = self.locks.lock_reservation(reservation_id).await?;

        let mut reservation = self.get_reservation(reservation_id).await?;
        if !reservation.can_extend(Utc::now()) {
            return Err(DomainError::InvalidInput(format!(
                "a {} reservation cannot be extended",
                reservation.status
            )));
        }

        let _facility_guard = self.locks.lock_facility(reservation.facility_id).await?;
        let facility = self
            .storage
            .get_facility(reservation.facility_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Facility",
                field: "id",
                value: reservation.facility_id.to_string(),
            })?;
        if facility.available_spaces <= 0 {
            return Err(DomainError::NoAvailability);
        }

        let quote = PricingEngine::quote_minutes(
            &facility,
            additional_hours * 60,
            reservation.use_ev_charging,
        );
        let new_end = reservation.end_time + Duration::hours(additional_hours);
        reservation.apply_extension(
            new_end,
            quote.parking_cost,
            quote.ev_cost,
            quote.owner_earnings,
            quote.platform_earnings,
        );

        self.storage.update_reservation(reservation.clone()).await?;

        info!(
            reservation_id,
            added_hours = additional_hours,
            added_cost = %quote.total_cost,
            new_end = %new_end,
            "reservation extended"
        );
        self.event_bus
            .publish(Event::ReservationExtended(ReservationExtendedEvent {
                reservation_id,
                user_id: reservation.user_id,
                new_end_time: new_end,
                added_cost: quote.total_cost.minor(),
                timestamp: Utc::now(),
            }));

        Ok(reservation)
    }

    /// Cancel a reservation, releasing the space and refunding the unused
    /// fraction of a settled booking to the wallet. Returns the refund
    /// amount (zero for unpaid bookings).
    pub async fn cancel(&self, reservation_id: i32) -> DomainResult<Money> {
        let _reservation_guard = self.locks.lock_reservation(reservation_id).await?;

        let mut reservation = self.get_reservation(reservation_id).await?;

        let _facility_guard = self.locks.lock_facility(reservation.facility_id).await?;
        let _user_guard = self.locks.lock_user(reservation.user_id).await?;

        let mut facility = self
            .storage
            .get_facility(reservation.facility_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Facility",
                field: "id",
                value: reservation.facility_id.to_string(),
            })?;

        let now = Utc::now();
        let prior = reservation.mark_cancelled(now)?;

        InventoryLedger::release(&mut facility);
        self.storage
            .clear_occupancy_sample(reservation.facility_id, reservation.space_number)
            .await?;

        let mut refund = Money::ZERO;
        if prior == ReservationStatus::Completed {
            let total_minutes = reservation.duration_minutes();
            let used_minutes =
                (now - reservation.start_time).num_minutes().clamp(0, total_minutes);
            let remaining_minutes = total_minutes - used_minutes;
            // Refund and reversal work from the settled snapshot; extension
            // cost added after settlement was never collected or credited.
            refund = reservation
                .settled_total
                .mul_ratio(remaining_minutes, total_minutes);

            facility.owner_earnings -= reservation.settled_owner_earnings;
            facility.platform_earnings -= reservation.settled_platform_earnings;

            if refund.is_positive() {
                let mut user = self
                    .storage
                    .get_user(reservation.user_id)
                    .await?
                    .ok_or(DomainError::NotFound {
                        entity: "User",
                        field: "id",
                        value: reservation.user_id.to_string(),
                    })?;
                user.balance += refund;
                self.storage
                    .save_payment(Payment::new(
                        user.id,
                        Some(reservation_id),
                        refund,
                        PaymentMethod::Refund,
                    ))
                    .await?;
                self.storage.update_user(user).await?;
            }
        }

        self.storage.update_facility(facility).await?;
        self.storage.update_reservation(reservation.clone()).await?;

        info!(
            reservation_id,
            prior_status = %prior,
            refund = %refund,
            "reservation cancelled"
        );
        self.event_bus
            .publish(Event::ReservationCancelled(ReservationCancelledEvent {
                reservation_id,
                user_id: reservation.user_id,
                facility_id: reservation.facility_id,
                refund_amount: refund.minor(),
                timestamp: Utc::now(),
            }));

        Ok(refund)
    }

    pub async fn get(&self, reservation_id: i32) -> DomainResult<Reservation> {
        self.get_reservation(reservation_id).await
    }

    pub async fn list_for_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        let mut reservations = self.storage.list_reservations_for_user(user_id).await?;
        reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reservations)
    }

    async fn get_reservation(&self, reservation_id: i32) -> DomainResult<Reservation> {
        self.storage
            .get_reservation(reservation_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation_id.to_string(),
            })
    }

    /// Lowest space number not held by a live booking and, on a
    /// sensor-managed facility, not reported occupied.
    async fn pick_space(&self, facility: &crate::domain::Facility) -> DomainResult<i32> {
        let reservations = self
            .storage
            .list_reservations_for_facility(facility.id)
            .await?;
        let mut taken: Vec<i32> = reservations
            .iter()
            .filter(|r| {
                matches!(
                    r.status,
                    ReservationStatus::Pending
                        | ReservationStatus::Completed
                        | ReservationStatus::Failed
                )
            })
            .map(|r| r.space_number)
            .collect();
        if facility.sensor_managed {
            let samples = self.storage.list_occupancy_for_facility(facility.id).await?;
            taken.extend(samples.iter().filter(|s| s.occupied).map(|s| s.space_number));
        }
        (1..=facility.total_spaces)
            .find(|n| !taken.contains(n))
            .ok_or(DomainError::NoAvailability)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OccupancySample;
    use crate::infrastructure::InMemoryStorage;
    use crate::notifications::create_event_bus;
    use std::time::Duration as StdDuration;

    fn stack(decline_probability: f64) -> (Arc<InMemoryStorage>, ReservationService) {
        let storage = Arc::new(InMemoryStorage::with_seed_data());
        (storage.clone(), service(storage, decline_probability))
    }

    fn service(storage: Arc<InMemoryStorage>, decline_probability: f64) -> ReservationService {
        let locks = Arc::new(LockManager::new(StdDuration::from_millis(200)));
        let bus = create_event_bus();
        let loyalty = Arc::new(LoyaltyService::new(
            storage.clone(),
            locks.clone(),
            bus.clone(),
            100,
        ));
        ReservationService::new(
            storage,
            locks,
            bus,
            Arc::new(PaymentService::new(decline_probability)),
            loyalty,
        )
    }

    fn two_hour_booking() -> BookingRequest {
        let start = Utc::now() + Duration::minutes(5);
        BookingRequest {
            user_id: 3,
            facility_id: 1,
            start_time: start,
            end_time: start + Duration::hours(2),
            vehicle_type: "Car".into(),
            license_plate: "TN69AB1234".into(),
            use_ev_charging: false,
        }
    }

    #[tokio::test]
    async fn create_quotes_and_holds_a_space() {
        let (storage, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();

        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.total_cost, Money::from_major(80));
        assert_eq!(r.owner_earnings, Money::from_major(68));
        assert_eq!(r.platform_earnings, Money::from_major(12));
        assert_eq!(r.space_number, 1);

        let facility = storage.get_facility(1).await.unwrap().unwrap();
        assert_eq!(facility.available_spaces, 19);
    }

    #[tokio::test]
    async fn create_rejects_blank_vehicle_details() {
        let (_, svc) = stack(0.0);
        let mut request = two_hour_booking();
        request.license_plate = "  ".into();
        assert!(matches!(
            svc.create(request).await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn create_fails_when_facility_is_full() {
        let (storage, svc) = stack(0.0);
        let mut facility = storage.get_facility(1).await.unwrap().unwrap();
        facility.available_spaces = 0;
        storage.update_facility(facility).await.unwrap();

        assert!(matches!(
            svc.create(two_hour_booking()).await,
            Err(DomainError::NoAvailability)
        ));
    }

    #[tokio::test]
    async fn settle_with_wallet_moves_all_ledgers() {
        let (storage, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        let payment = svc.settle(r.id, PaymentMethod::Wallet).await.unwrap();

        assert!(payment.id.starts_with("txn_"));
        assert_eq!(payment.amount, Money::from_major(80));

        let user = storage.get_user(3).await.unwrap().unwrap();
        assert_eq!(user.balance, Money::from_major(420));
        // 80 spent at 0.1 points per rupee
        assert_eq!(user.reward_points, 8);

        let facility = storage.get_facility(1).await.unwrap().unwrap();
        assert_eq!(facility.owner_earnings, Money::from_major(68));
        assert_eq!(facility.platform_earnings, Money::from_major(12));

        let settled = svc.get(r.id).await.unwrap();
        assert_eq!(settled.status, ReservationStatus::Completed);
        assert_eq!(settled.payment_method.as_deref(), Some("wallet"));
        assert!(settled.paid_at.is_some());
        assert!(settled.actual_end.is_some());
    }

    #[tokio::test]
    async fn settle_twice_is_already_settled() {
        let (_, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        svc.settle(r.id, PaymentMethod::Wallet).await.unwrap();
        let err = svc.settle(r.id, PaymentMethod::Wallet).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadySettled));
    }

    #[tokio::test]
    async fn insufficient_funds_leaves_everything_untouched() {
        let (storage, svc) = stack(0.0);
        let mut user = storage.get_user(3).await.unwrap().unwrap();
        user.balance = Money::from_major(50);
        storage.update_user(user).await.unwrap();

        let r = svc.create(two_hour_booking()).await.unwrap();
        let err = svc.settle(r.id, PaymentMethod::Wallet).await.unwrap_err();
        assert!(matches!(err, DomainError::InsufficientFunds));

        let user = storage.get_user(3).await.unwrap().unwrap();
        assert_eq!(user.balance, Money::from_major(50));
        assert_eq!(user.reward_points, 0);
        assert_eq!(
            svc.get(r.id).await.unwrap().status,
            ReservationStatus::Pending
        );
        let facility = storage.get_facility(1).await.unwrap().unwrap();
        assert_eq!(facility.owner_earnings, Money::ZERO);
    }

    #[tokio::test]
    async fn gateway_decline_marks_failed_and_is_retryable() {
        let (storage, declining) = stack(1.0);
        let r = declining.create(two_hour_booking()).await.unwrap();

        let err = declining
            .settle(r.id, PaymentMethod::CreditCard)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::GatewayDeclined));
        assert_eq!(
            declining.get(r.id).await.unwrap().status,
            ReservationStatus::Failed
        );

        let accepting = service(storage, 0.0);
        accepting.settle(r.id, PaymentMethod::CreditCard).await.unwrap();
        assert_eq!(
            accepting.get(r.id).await.unwrap().status,
            ReservationStatus::Completed
        );
    }

    #[tokio::test]
    async fn cancel_unpaid_releases_space_without_refund() {
        let (storage, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        let refund = svc.cancel(r.id).await.unwrap();

        assert_eq!(refund, Money::ZERO);
        let facility = storage.get_facility(1).await.unwrap().unwrap();
        assert_eq!(facility.available_spaces, 20);
        let cancelled = svc.get(r.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(cancelled.actual_end.is_some());
        // No refund record for an unpaid booking
        assert!(storage
            .list_payments_for_reservation(r.id)
            .await
            .unwrap()
            .iter()
            .all(|p| p.method != PaymentMethod::Refund));
    }

    #[tokio::test]
    async fn cancel_before_start_refunds_in_full() {
        let (storage, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        svc.settle(r.id, PaymentMethod::Wallet).await.unwrap();

        let refund = svc.cancel(r.id).await.unwrap();
        assert_eq!(refund, Money::from_major(80));

        let user = storage.get_user(3).await.unwrap().unwrap();
        assert_eq!(user.balance, Money::from_major(500));

        // Earnings credit backed out
        let facility = storage.get_facility(1).await.unwrap().unwrap();
        assert_eq!(facility.owner_earnings, Money::ZERO);
        assert_eq!(facility.platform_earnings, Money::ZERO);

        let payments = storage.list_payments_for_reservation(r.id).await.unwrap();
        assert!(payments
            .iter()
            .any(|p| p.method == PaymentMethod::Refund && p.amount == Money::from_major(80)));
    }

    #[tokio::test]
    async fn cancel_after_extension_reverses_only_settled_earnings() {
        let (storage, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        svc.settle(r.id, PaymentMethod::Wallet).await.unwrap();
        svc.extend(r.id, 1).await.unwrap();

        // Only the 80 collected at settlement comes back; the uncharged
        // extension never reached the facility ledger.
        let refund = svc.cancel(r.id).await.unwrap();
        assert_eq!(refund, Money::from_major(80));

        let facility = storage.get_facility(1).await.unwrap().unwrap();
        assert_eq!(facility.owner_earnings, Money::ZERO);
        assert_eq!(facility.platform_earnings, Money::ZERO);

        let user = storage.get_user(3).await.unwrap().unwrap();
        assert_eq!(user.balance, Money::from_major(500));
    }

    #[tokio::test]
    async fn cancel_after_end_refunds_nothing() {
        let (storage, svc) = stack(0.0);
        let mut request = two_hour_booking();
        request.start_time = Utc::now() - Duration::hours(3);
        request.end_time = Utc::now() - Duration::hours(1);
        let r = svc.create(request).await.unwrap();
        svc.settle(r.id, PaymentMethod::Wallet).await.unwrap();

        let refund = svc.cancel(r.id).await.unwrap();
        assert_eq!(refund, Money::ZERO);
        let user = storage.get_user(3).await.unwrap().unwrap();
        assert_eq!(user.balance, Money::from_major(420));
    }

    #[tokio::test]
    async fn cancel_twice_fails() {
        let (_, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        svc.cancel(r.id).await.unwrap();
        assert!(svc.cancel(r.id).await.is_err());
    }

    #[tokio::test]
    async fn extend_adds_cost_and_moves_end() {
        let (_, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        svc.settle(r.id, PaymentMethod::Wallet).await.unwrap();

        let extended = svc.extend(r.id, 1).await.unwrap();
        assert_eq!(extended.end_time, r.end_time + Duration::hours(1));
        assert_eq!(extended.total_cost, Money::from_major(120));
        assert_eq!(
            extended.owner_earnings + extended.platform_earnings,
            extended.total_cost
        );
    }

    #[tokio::test]
    async fn extend_requires_free_capacity() {
        let (storage, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        svc.settle(r.id, PaymentMethod::Wallet).await.unwrap();

        let mut facility = storage.get_facility(1).await.unwrap().unwrap();
        facility.available_spaces = 0;
        storage.update_facility(facility).await.unwrap();

        assert!(matches!(
            svc.extend(r.id, 1).await,
            Err(DomainError::NoAvailability)
        ));
    }

    #[tokio::test]
    async fn extend_cancelled_reservation_fails() {
        let (_, svc) = stack(0.0);
        let r = svc.create(two_hour_booking()).await.unwrap();
        svc.cancel(r.id).await.unwrap();
        assert!(matches!(
            svc.extend(r.id, 1).await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn sensor_occupied_space_is_not_assigned() {
        let (storage, svc) = stack(0.0);
        let mut facility = storage.get_facility(1).await.unwrap().unwrap();
        facility.reconcile_occupancy(1);
        storage.update_facility(facility).await.unwrap();
        storage
            .upsert_occupancy_sample(OccupancySample {
                facility_id: 1,
                space_number: 1,
                occupied: true,
                battery_level: None,
                reported_at: Utc::now(),
            })
            .await
            .unwrap();

        let r = svc.create(two_hour_booking()).await.unwrap();
        assert_eq!(r.space_number, 2);
    }

    #[tokio::test]
    async fn spaces_are_assigned_distinctly() {
        let (_, svc) = stack(0.0);
        let a = svc.create(two_hour_booking()).await.unwrap();
        let b = svc.create(two_hour_booking()).await.unwrap();
        assert_ne!(a.space_number, b.space_number);

        // A cancelled space is reused
        svc.cancel(a.id).await.unwrap();
        let c = svc.create(two_hour_booking()).await.unwrap();
        assert_eq!(c.space_number, a.space_number);
        assert_ne!(c.space_number, b.space_number);
    }
}
