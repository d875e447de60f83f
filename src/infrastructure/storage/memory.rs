//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::Storage;
use crate::domain::{
    Facility, LoyaltyProgram, OccupancySample, Payment, Reservation, User, UserRole,
    VerificationStatus, Vehicle,
};
use crate::shared::{DomainError, DomainResult, Money};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    users: DashMap<i32, User>,
    facilities: DashMap<i32, Facility>,
    reservations: DashMap<i32, Reservation>,
    payments: DashMap<String, Payment>,
    loyalty_programs: DashMap<i32, LoyaltyProgram>,
    occupancy: DashMap<(i32, i32), OccupancySample>,
    user_counter: AtomicI32,
    facility_counter: AtomicI32,
    reservation_counter: AtomicI32,
    program_counter: AtomicI32,
    vehicle_counter: AtomicI32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            facilities: DashMap::new(),
            reservations: DashMap::new(),
            payments: DashMap::new(),
            loyalty_programs: DashMap::new(),
            occupancy: DashMap::new(),
            user_counter: AtomicI32::new(1),
            facility_counter: AtomicI32::new(1),
            reservation_counter: AtomicI32::new(1),
            program_counter: AtomicI32::new(1),
            vehicle_counter: AtomicI32::new(1),
        }
    }

    /// Storage pre-populated with demo accounts, one approved facility and
    /// an active rewards program.
    pub fn with_seed_data() -> Self {
        let storage = Self::new();

        let admin = User::new(1, "Admin", UserRole::Admin);
        let owner = User::new(2, "Ravi", UserRole::Owner);
        let mut rider = User::new(3, "Asha", UserRole::Rider);
        rider.balance = Money::from_major(500);
        rider.fastag_id = Some("FT-1001".to_string());
        rider.vehicles.push(Vehicle {
            id: 1,
            vehicle_type: "Car".to_string(),
            license_plate: "TN69AB1234".to_string(),
            is_ev: false,
            is_default: true,
        });
        storage.users.insert(1, admin);
        storage.users.insert(2, owner);
        storage.users.insert(3, rider);
        storage.user_counter.store(4, Ordering::SeqCst);
        storage.vehicle_counter.store(2, Ordering::SeqCst);

        let facility = Facility {
            id: 1,
            owner_id: 2,
            name: "Harbour Gate Parking".to_string(),
            address: "Beach Road, Tuticorin".to_string(),
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
            features: serde_json::json!({ "covered": true, "security": true }),
            created_at: Utc::now(),
        };
        storage.facilities.insert(1, facility);
        storage.facility_counter.store(2, Ordering::SeqCst);

        let program = LoyaltyProgram {
            id: 1,
            name: "Dock Rewards".to_string(),
            points_per_unit_milli: 100,
            min_redeem_points: 100,
            redeem_value: Money::from_major(10),
            is_active: true,
            created_at: Utc::now(),
        };
        storage.loyalty_programs.insert(1, program);
        storage.program_counter.store(2, Ordering::SeqCst);

        storage
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_user(&self, mut user: User) -> DomainResult<User> {
        let id = self.user_counter.fetch_add(1, Ordering::SeqCst);
        user.id = id;
        user.created_at = Utc::now();
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn update_user(&self, user: User) -> DomainResult<()> {
        if !self.users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user.id.to_string(),
            });
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        Ok(self.users.iter().map(|u| u.clone()).collect())
    }

    async fn save_facility(&self, mut facility: Facility) -> DomainResult<Facility> {
        let id = self.facility_counter.fetch_add(1, Ordering::SeqCst);
        facility.id = id;
        facility.created_at = Utc::now();
        self.facilities.insert(id, facility.clone());
        Ok(facility)
    }

    async fn get_facility(&self, id: i32) -> DomainResult<Option<Facility>> {
        Ok(self.facilities.get(&id).map(|f| f.clone()))
    }

    async fn update_facility(&self, facility: Facility) -> DomainResult<()> {
        if !self.facilities.contains_key(&facility.id) {
            return Err(DomainError::NotFound {
                entity: "Facility",
                field: "id",
                value: facility.id.to_string(),
            });
        }
        self.facilities.insert(facility.id, facility);
        Ok(())
    }

    async fn list_facilities(&self) -> DomainResult<Vec<Facility>> {
        Ok(self.facilities.iter().map(|f| f.clone()).collect())
    }

    async fn save_reservation(&self, reservation: Reservation) -> DomainResult<Reservation> {
        self.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn get_reservation(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update_reservation(&self, reservation: Reservation) -> DomainResult<()> {
        if !self.reservations.contains_key(&reservation.id) {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation.id.to_string(),
            });
        }
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn list_reservations_for_user(&self, user_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn list_reservations_for_facility(
        &self,
        facility_id: i32,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.facility_id == facility_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn save_payment(&self, payment: Payment) -> DomainResult<()> {
        self.payments.insert(payment.id.clone(), payment);
        Ok(())
    }

    async fn list_payments_for_user(&self, user_id: i32) -> DomainResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.clone())
            .collect();
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }

    async fn list_payments_for_reservation(
        &self,
        reservation_id: i32,
    ) -> DomainResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.reservation_id == Some(reservation_id))
            .map(|p| p.clone())
            .collect();
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }

    async fn save_loyalty_program(
        &self,
        mut program: LoyaltyProgram,
    ) -> DomainResult<LoyaltyProgram> {
        let id = self.program_counter.fetch_add(1, Ordering::SeqCst);
        program.id = id;
        program.created_at = Utc::now();
        if program.is_active {
            // A single active program at a time
            for mut existing in self.loyalty_programs.iter_mut() {
                existing.is_active = false;
            }
        }
        self.loyalty_programs.insert(id, program.clone());
        Ok(program)
    }

    async fn update_loyalty_program(&self, program: LoyaltyProgram) -> DomainResult<()> {
        if !self.loyalty_programs.contains_key(&program.id) {
            return Err(DomainError::NotFound {
                entity: "LoyaltyProgram",
                field: "id",
                value: program.id.to_string(),
            });
        }
        if program.is_active {
            for mut existing in self.loyalty_programs.iter_mut() {
                if existing.id != program.id {
                    existing.is_active = false;
                }
            }
        }
        self.loyalty_programs.insert(program.id, program);
        Ok(())
    }

    async fn get_active_loyalty_program(&self) -> DomainResult<Option<LoyaltyProgram>> {
        Ok(self
            .loyalty_programs
            .iter()
            .find(|p| p.is_active)
            .map(|p| p.clone()))
    }

    async fn list_loyalty_programs(&self) -> DomainResult<Vec<LoyaltyProgram>> {
        Ok(self.loyalty_programs.iter().map(|p| p.clone()).collect())
    }

    async fn upsert_occupancy_sample(&self, sample: OccupancySample) -> DomainResult<()> {
        self.occupancy
            .insert((sample.facility_id, sample.space_number), sample);
        Ok(())
    }

    async fn list_occupancy_for_facility(
        &self,
        facility_id: i32,
    ) -> DomainResult<Vec<OccupancySample>> {
        let mut samples: Vec<OccupancySample> = self
            .occupancy
            .iter()
            .filter(|s| s.facility_id == facility_id)
            .map(|s| s.clone())
            .collect();
        samples.sort_by_key(|s| s.space_number);
        Ok(samples)
    }

    async fn count_occupied(&self, facility_id: i32) -> DomainResult<i32> {
        Ok(self
            .occupancy
            .iter()
            .filter(|s| s.facility_id == facility_id && s.occupied)
            .count() as i32)
    }

    async fn clear_occupancy_sample(
        &self,
        facility_id: i32,
        space_number: i32,
    ) -> DomainResult<()> {
        self.occupancy.remove(&(facility_id, space_number));
        Ok(())
    }

    async fn next_reservation_id(&self) -> i32 {
        self.reservation_counter.fetch_add(1, Ordering::SeqCst)
    }

    async fn next_vehicle_id(&self) -> i32 {
        self.vehicle_counter.fetch_add(1, Ordering::SeqCst)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_data_is_consistent() {
        let storage = InMemoryStorage::with_seed_data();
        let facility = storage.get_facility(1).await.unwrap().unwrap();
        assert_eq!(facility.available_spaces, facility.total_spaces);
        assert!(facility.is_bookable());

        let rider = storage.get_user(3).await.unwrap().unwrap();
        assert_eq!(rider.balance, Money::from_major(500));
        assert!(rider.default_vehicle().is_some());

        let program = storage.get_active_loyalty_program().await.unwrap().unwrap();
        assert_eq!(program.min_redeem_points, 100);
    }

    #[tokio::test]
    async fn save_user_assigns_next_id() {
        let storage = InMemoryStorage::with_seed_data();
        let saved = storage
            .save_user(User::new(0, "Kumar", UserRole::Rider))
            .await
            .unwrap();
        assert_eq!(saved.id, 4);
        assert!(storage.get_user(4).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_missing_facility_is_not_found() {
        let storage = InMemoryStorage::new();
        let mut facility = InMemoryStorage::with_seed_data()
            .get_facility(1)
            .await
            .unwrap()
            .unwrap();
        facility.id = 99;
        let err = storage.update_facility(facility).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Facility", .. }));
    }

    #[tokio::test]
    async fn only_one_active_loyalty_program() {
        let storage = InMemoryStorage::with_seed_data();
        let program = LoyaltyProgram {
            id: 0,
            name: "Monsoon Special".to_string(),
            points_per_unit_milli: 200,
            min_redeem_points: 50,
            redeem_value: Money::from_major(5),
            is_active: true,
            created_at: Utc::now(),
        };
        let saved = storage.save_loyalty_program(program).await.unwrap();
        let active = storage.get_active_loyalty_program().await.unwrap().unwrap();
        assert_eq!(active.id, saved.id);
        let all = storage.list_loyalty_programs().await.unwrap();
        assert_eq!(all.iter().filter(|p| p.is_active).count(), 1);
    }

    #[tokio::test]
    async fn occupancy_samples_upsert_by_space() {
        let storage = InMemoryStorage::with_seed_data();
        storage
            .upsert_occupancy_sample(OccupancySample::new(1, 4, true, Some(90.0)))
            .await
            .unwrap();
        storage
            .upsert_occupancy_sample(OccupancySample::new(1, 4, false, Some(89.0)))
            .await
            .unwrap();
        storage
            .upsert_occupancy_sample(OccupancySample::new(1, 5, true, None))
            .await
            .unwrap();

        assert_eq!(storage.count_occupied(1).await.unwrap(), 1);
        assert_eq!(
            storage.list_occupancy_for_facility(1).await.unwrap().len(),
            2
        );

        storage.clear_occupancy_sample(1, 5).await.unwrap();
        assert_eq!(storage.count_occupied(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reservation_ids_are_monotonic() {
        let storage = InMemoryStorage::new();
        let a = storage.next_reservation_id().await;
        let b = storage.next_reservation_id().await;
        assert_eq!(b, a + 1);
    }
}
