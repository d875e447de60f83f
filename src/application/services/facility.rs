//! Facility listings, verification and account management
//!
//! Owner-facing registration, the rider-facing query surface (filtered and
//! nearby listings), admin verification, wallet top-ups and vehicle /
//! instrument management.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    Facility, Payment, PaymentMethod, User, VerificationStatus, Vehicle,
};
use crate::infrastructure::{LockManager, Storage};
use crate::notifications::{Event, FacilityVerifiedEvent, SharedEventBus};
use crate::shared::geo::haversine_km;
use crate::shared::{DomainError, DomainResult, Money};

/// New facility listing submitted by an owner.
#[derive(Debug, Clone)]
pub struct FacilitySpec {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_spaces: i32,
    pub price_per_hour: Money,
    pub has_ev_charging: bool,
    pub ev_price_per_hour: Money,
    pub is_public: bool,
    pub features: serde_json::Value,
}

/// Listing filters. Defaults show approved facilities only.
#[derive(Debug, Clone, Default)]
pub struct FacilityFilters {
    pub requires_ev_charging: bool,
    pub max_price_per_hour: Option<Money>,
    pub min_available_spaces: Option<i32>,
    pub public_only: bool,
    pub include_unverified: bool,
}

/// Service for facility and account operations
pub struct FacilityService {
    storage: Arc<dyn Storage>,
    locks: Arc<LockManager>,
    event_bus: SharedEventBus,
    /// Platform cut applied to new listings, in basis points
    default_revenue_share_bps: u32,
}

impl FacilityService {
    pub fn new(
        storage: Arc<dyn Storage>,
        locks: Arc<LockManager>,
        event_bus: SharedEventBus,
        default_revenue_share_bps: u32,
    ) -> Self {
        Self {
            storage,
            locks,
            event_bus,
            default_revenue_share_bps,
        }
    }

    /// Submit a facility for listing. It stays hidden until an admin
    /// approves it.
    pub async fn register(&self, owner_id: i32, spec: FacilitySpec) -> DomainResult<Facility> {
        let owner = self.get_user(owner_id).await?;
        if spec.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("facility name is required".into()));
        }
        if spec.total_spaces <= 0 {
            return Err(DomainError::InvalidInput(
                "total spaces must be positive".into(),
            ));
        }
        if !spec.price_per_hour.is_positive() {
            return Err(DomainError::InvalidInput(
                "price per hour must be positive".into(),
            ));
        }

        let facility = self
            .storage
            .save_facility(Facility {
                id: 0,
                owner_id: owner.id,
                name: spec.name,
                address: spec.address,
                latitude: spec.latitude,
                longitude: spec.longitude,
                total_spaces: spec.total_spaces,
                available_spaces: spec.total_spaces,
                price_per_hour: spec.price_per_hour,
                has_ev_charging: spec.has_ev_charging,
                ev_price_per_hour: spec.ev_price_per_hour,
                is_public: spec.is_public,
                revenue_share_bps: self.default_revenue_share_bps,
                verification: VerificationStatus::Pending,
                verification_notes: None,
                owner_earnings: Money::ZERO,
                platform_earnings: Money::ZERO,
                sensor_managed: false,
                features: spec.features,
                created_at: Utc::now(),
            })
            .await?;

        info!(
            facility_id = facility.id,
            owner_id,
            spaces = facility.total_spaces,
            "facility registered, pending verification"
        );
        Ok(facility)
    }

    /// Facilities matching the filters, approved-only unless asked.
    pub async fn list(&self, filters: &FacilityFilters) -> DomainResult<Vec<Facility>> {
        let mut facilities: Vec<Facility> = self
            .storage
            .list_facilities()
            .await?
            .into_iter()
            .filter(|f| Self::matches(f, filters))
            .collect();
        facilities.sort_by_key(|f| f.id);
        Ok(facilities)
    }

    /// Facilities within `radius_km` of a point, nearest first.
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        filters: &FacilityFilters,
    ) -> DomainResult<Vec<(Facility, f64)>> {
        if radius_km <= 0.0 {
            return Err(DomainError::InvalidInput(
                "search radius must be positive".into(),
            ));
        }
        let mut nearby: Vec<(Facility, f64)> = self
            .storage
            .list_facilities()
            .await?
            .into_iter()
            .filter(|f| Self::matches(f, filters))
            .map(|f| {
                let distance = haversine_km(latitude, longitude, f.latitude, f.longitude);
                (f, distance)
            })
            .filter(|(_, d)| *d <= radius_km)
            .collect();
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(nearby)
    }

    /// Admin decision on a pending listing. The owner is notified either
    /// way.
    pub async fn verify(
        &self,
        admin_id: i32,
        facility_id: i32,
        approve: bool,
        notes: Option<String>,
    ) -> DomainResult<Facility> {
        let admin = self.get_user(admin_id).await?;
        if !admin.is_admin() {
            return Err(DomainError::Forbidden(
                "only admins may verify facilities".to_string(),
            ));
        }

        let _facility_guard = self.locks.lock_facility(facility_id).await?;
        let mut facility = self.get_facility(facility_id).await?;
        if approve {
            facility.approve(notes.clone());
        } else {
            facility.reject(notes.clone());
        }
        self.storage.update_facility(facility.clone()).await?;

        info!(facility_id, approve, "facility verification decided");
        let event = FacilityVerifiedEvent {
            facility_id,
            owner_id: facility.owner_id,
            facility_name: facility.name.clone(),
            notes,
            timestamp: Utc::now(),
        };
        self.event_bus.publish(if approve {
            Event::FacilityApproved(event)
        } else {
            Event::FacilityRejected(event)
        });

        Ok(facility)
    }

    /// Credit a user's wallet, with a ledger record.
    pub async fn top_up_wallet(&self, user_id: i32, amount: Money) -> DomainResult<Money> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidInput(
                "top-up amount must be positive".into(),
            ));
        }
        let _user_guard = self.locks.lock_user(user_id).await?;
        let mut user = self.get_user(user_id).await?;
        user.balance += amount;
        let balance = user.balance;

        self.storage
            .save_payment(Payment::new(user_id, None, amount, PaymentMethod::Wallet))
            .await?;
        self.storage.update_user(user).await?;

        info!(user_id, %amount, %balance, "wallet topped up");
        Ok(balance)
    }

    /// Register a vehicle. The first vehicle becomes the default.
    pub async fn add_vehicle(
        &self,
        user_id: i32,
        vehicle_type: String,
        license_plate: String,
        is_ev: bool,
    ) -> DomainResult<Vehicle> {
        if vehicle_type.trim().is_empty() || license_plate.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "vehicle type and license plate are required".into(),
            ));
        }

        let _user_guard = self.locks.lock_user(user_id).await?;
        let mut user = self.get_user(user_id).await?;
        if user
            .vehicles
            .iter()
            .any(|v| v.license_plate == license_plate)
        {
            return Err(DomainError::Conflict(format!(
                "vehicle {} already registered",
                license_plate
            )));
        }

        let vehicle = Vehicle {
            id: self.storage.next_vehicle_id().await,
            vehicle_type,
            license_plate,
            is_ev,
            is_default: user.vehicles.is_empty(),
        };
        user.vehicles.push(vehicle.clone());
        self.storage.update_user(user).await?;
        Ok(vehicle)
    }

    pub async fn remove_vehicle(&self, user_id: i32, vehicle_id: i32) -> DomainResult<()> {
        let _user_guard = self.locks.lock_user(user_id).await?;
        let mut user = self.get_user(user_id).await?;
        let before = user.vehicles.len();
        user.vehicles.retain(|v| v.id != vehicle_id);
        if user.vehicles.len() == before {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle_id.to_string(),
            });
        }
        // Keep a default around if one was removed
        if !user.vehicles.is_empty() && !user.vehicles.iter().any(|v| v.is_default) {
            user.vehicles[0].is_default = true;
        }
        self.storage.update_user(user).await?;
        Ok(())
    }

    /// Link a contactless instrument to the account.
    pub async fn link_instrument(
        &self,
        user_id: i32,
        method: PaymentMethod,
        instrument_id: String,
    ) -> DomainResult<()> {
        if instrument_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("instrument id is required".into()));
        }
        let _user_guard = self.locks.lock_user(user_id).await?;
        let mut user = self.get_user(user_id).await?;
        match method {
            PaymentMethod::FasTag => user.fastag_id = Some(instrument_id),
            PaymentMethod::Nfc => user.nfc_card_id = Some(instrument_id),
            other => {
                return Err(DomainError::InvalidInput(format!(
                    "{} is not a linkable instrument",
                    other
                )))
            }
        }
        self.storage.update_user(user).await?;
        Ok(())
    }

    pub async fn get(&self, facility_id: i32) -> DomainResult<Facility> {
        self.get_facility(facility_id).await
    }

    fn matches(facility: &Facility, filters: &FacilityFilters) -> bool {
        if !filters.include_unverified && !facility.is_bookable() {
            return false;
        }
        if filters.requires_ev_charging && !facility.has_ev_charging {
            return false;
        }
        if filters.public_only && !facility.is_public {
            return false;
        }
        if let Some(max_price) = filters.max_price_per_hour {
            if facility.price_per_hour > max_price {
                return false;
            }
        }
        if let Some(min_available) = filters.min_available_spaces {
            if facility.available_spaces < min_available {
                return false;
            }
        }
        true
    }

    async fn get_user(&self, user_id: i32) -> DomainResult<User> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })
    }

    async fn get_facility(&self, facility_id: i32) -> DomainResult<Facility> {
        self.storage
            .get_facility(facility_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Facility",
                field: "id",
                value: facility_id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────
