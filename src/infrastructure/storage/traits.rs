//! Storage trait definitions

use async_trait::async_trait;

use crate::domain::{Facility, LoyaltyProgram, OccupancySample, Payment, Reservation, User};
use crate::shared::DomainResult;

/// Storage trait for persistence operations
#[async_trait]
pub trait Storage: Send + Sync {
    // User operations
    async fn save_user(&self, user: User) -> DomainResult<User>;
    async fn get_user(&self, id: i32) -> DomainResult<Option<User>>;
    async fn update_user(&self, user: User) -> DomainResult<()>;
    async fn list_users(&self) -> DomainResult<Vec<User>>;

    // Facility operations
    async fn save_facility(&self, facility: Facility) -> DomainResult<Facility>;
    async fn get_facility(&self, id: i32) -> DomainResult<Option<Facility>>;
    async fn update_facility(&self, facility: Facility) -> DomainResult<()>;
    async fn list_facilities(&self) -> DomainResult<Vec<Facility>>;

    // Reservation operations
    async fn save_reservation(&self, reservation: Reservation) -> DomainResult<Reservation>;
    async fn get_reservation(&self, id: i32) -> DomainResult<Option<Reservation>>;
    async fn update_reservation(&self, reservation: Reservation) -> DomainResult<()>;
    async fn list_reservations_for_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>>;
    async fn list_reservations_for_facility(
        &self,
        facility_id: i32,
    ) -> DomainResult<Vec<Reservation>>;

    // Payment ledger (append-only)
    async fn save_payment(&self, payment: Payment) -> DomainResult<()>;
    async fn list_payments_for_user(&self, user_id: i32) -> DomainResult<Vec<Payment>>;
    async fn list_payments_for_reservation(
        &self,
        reservation_id: i32,
    ) -> DomainResult<Vec<Payment>>;

    // Loyalty program operations
    async fn save_loyalty_program(&self, program: LoyaltyProgram) -> DomainResult<LoyaltyProgram>;
    async fn update_loyalty_program(&self, program: LoyaltyProgram) -> DomainResult<()>;
    async fn get_active_loyalty_program(&self) -> DomainResult<Option<LoyaltyProgram>>;
    async fn list_loyalty_programs(&self) -> DomainResult<Vec<LoyaltyProgram>>;

    // Occupancy samples, keyed by (facility, space)
    async fn upsert_occupancy_sample(&self, sample: OccupancySample) -> DomainResult<()>;
    async fn list_occupancy_for_facility(
        &self,
        facility_id: i32,
    ) -> DomainResult<Vec<OccupancySample>>;
    async fn count_occupied(&self, facility_id: i32) -> DomainResult<i32>;
    async fn clear_occupancy_sample(&self, facility_id: i32, space_number: i32)
        -> DomainResult<()>;

    // Utility
    async fn next_reservation_id(&self) -> i32;
    async fn next_vehicle_id(&self) -> i32;
}
