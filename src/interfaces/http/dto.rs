//! Data Transfer Objects for the REST API
//!
//! Monetary fields travel as integer minor currency units (`*_minor`).

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{FacilityFilters, FacilitySpec};
use crate::domain::{
    Facility, LoyaltyProgram, OccupancySample, Payment, Redemption, Reservation, Vehicle,
};
use crate::shared::{DomainError, Money};

/// Standard response envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a domain error.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) | DomainError::InvalidDuration => StatusCode::BAD_REQUEST,
        DomainError::NoAvailability
        | DomainError::AlreadySettled
        | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::InsufficientFunds
        | DomainError::InsufficientPoints
        | DomainError::InstrumentNotLinked(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::GatewayDeclined => StatusCode::PAYMENT_REQUIRED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Busy(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error rejection used by every handler.
pub fn reject<T>(error: DomainError) -> (StatusCode, axum::Json<ApiResponse<T>>) {
    (
        status_for(&error),
        axum::Json(ApiResponse::error(error.to_string())),
    )
}

// ── Facilities ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterFacilityRequest {
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_spaces: i32,
    pub price_per_hour_minor: i64,
    #[serde(default)]
    pub has_ev_charging: bool,
    #[serde(default)]
    pub ev_price_per_hour_minor: i64,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub features: serde_json::Value,
}

fn default_true() -> bool {
    true
}

impl RegisterFacilityRequest {
    pub fn into_spec(self) -> (i32, FacilitySpec) {
        (
            self.owner_id,
            FacilitySpec {
                name: self.name,
                address: self.address,
                latitude: self.latitude,
                longitude: self.longitude,
                total_spaces: self.total_spaces,
                price_per_hour: Money::from_minor(self.price_per_hour_minor),
                has_ev_charging: self.has_ev_charging,
                ev_price_per_hour: Money::from_minor(self.ev_price_per_hour_minor),
                is_public: self.is_public,
                features: self.features,
            },
        )
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FacilityQuery {
    /// Only facilities with EV charging
    #[serde(default)]
    pub ev_charging: bool,
    /// Maximum hourly price in minor units
    pub max_price_minor: Option<i64>,
    /// Minimum free spaces
    pub min_available: Option<i32>,
    /// Only publicly accessible facilities
    #[serde(default)]
    pub public_only: bool,
    /// Include listings still awaiting verification
    #[serde(default)]
    pub include_unverified: bool,
}

impl FacilityQuery {
    pub fn into_filters(self) -> FacilityFilters {
        FacilityFilters {
            requires_ev_charging: self.ev_charging,
            max_price_per_hour: self.max_price_minor.map(Money::from_minor),
            min_available_spaces: self.min_available,
            public_only: self.public_only,
            include_unverified: self.include_unverified,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in kilometres
    pub radius_km: f64,
    #[serde(default)]
    pub ev_charging: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyFacilityRequest {
    pub admin_id: i32,
    pub approve: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacilityDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_spaces: i32,
    pub available_spaces: i32,
    pub price_per_hour_minor: i64,
    pub has_ev_charging: bool,
    pub ev_price_per_hour_minor: i64,
    pub is_public: bool,
    pub verification: String,
    pub sensor_managed: bool,
    pub features: serde_json::Value,
    /// Distance from the query point, for nearby searches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl FacilityDto {
    pub fn from_domain(facility: Facility) -> Self {
        Self {
            id: facility.id,
            owner_id: facility.owner_id,
            name: facility.name,
            address: facility.address,
            latitude: facility.latitude,
            longitude: facility.longitude,
            total_spaces: facility.total_spaces,
            available_spaces: facility.available_spaces,
            price_per_hour_minor: facility.price_per_hour.minor(),
            has_ev_charging: facility.has_ev_charging,
            ev_price_per_hour_minor: facility.ev_price_per_hour.minor(),
            is_public: facility.is_public,
            verification: facility.verification.to_string(),
            sensor_managed: facility.sensor_managed,
            features: facility.features,
            distance_km: None,
        }
    }

    pub fn with_distance(facility: Facility, distance_km: f64) -> Self {
        let mut dto = Self::from_domain(facility);
        dto.distance_km = Some(distance_km);
        dto
    }
}

// ── Reservations ───────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub user_id: i32,
    pub facility_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub vehicle_type: String,
    pub license_plate: String,
    #[serde(default)]
    pub use_ev_charging: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayReservationRequest {
    /// One of `wallet`, `fastag`, `nfc`, `credit_card`, `debit_card`
    pub method: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtendReservationRequest {
    pub additional_hours: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub user_id: i32,
    pub facility_id: i32,
    pub space_number: i32,
    pub vehicle_type: String,
    pub license_plate: String,
    pub use_ev_charging: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub parking_cost_minor: i64,
    pub ev_cost_minor: i64,
    pub total_cost_minor: i64,
    pub status: String,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ReservationDto {
    pub fn from_domain(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            facility_id: reservation.facility_id,
            space_number: reservation.space_number,
            vehicle_type: reservation.vehicle_type,
            license_plate: reservation.license_plate,
            use_ev_charging: reservation.use_ev_charging,
            start_time: reservation.start_time,
            end_time: reservation.end_time,
            parking_cost_minor: reservation.parking_cost.minor(),
            ev_cost_minor: reservation.ev_cost.minor(),
            total_cost_minor: reservation.total_cost.minor(),
            status: reservation.status.to_string(),
            payment_method: reservation.payment_method,
            paid_at: reservation.paid_at,
            created_at: reservation.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub transaction_id: String,
    pub user_id: i32,
    pub reservation_id: Option<i32>,
    pub amount_minor: i64,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

impl PaymentDto {
    pub fn from_domain(payment: Payment) -> Self {
        Self {
            transaction_id: payment.id,
            user_id: payment.user_id,
            reservation_id: payment.reservation_id,
            amount_minor: payment.amount.minor(),
            method: payment.method.to_string(),
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefundDto {
    pub reservation_id: i32,
    pub refund_minor: i64,
}

// ── Loyalty ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemPointsRequest {
    pub user_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedemptionDto {
    pub vouchers: i64,
    pub points_spent: i64,
    pub wallet_credit_minor: i64,
}

impl RedemptionDto {
    pub fn from_domain(redemption: Redemption) -> Self {
        Self {
            vouchers: redemption.vouchers,
            points_spent: redemption.points_spent,
            wallet_credit_minor: redemption.wallet_credit.minor(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertProgramRequest {
    pub admin_id: i32,
    pub name: String,
    /// Milli-points per major unit spent (100 = 0.1 points per unit)
    pub points_per_unit_milli: i64,
    pub min_redeem_points: i64,
    pub redeem_value_minor: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoyaltyProgramDto {
    pub id: i32,
    pub name: String,
    pub points_per_unit_milli: i64,
    pub min_redeem_points: i64,
    pub redeem_value_minor: i64,
    pub is_active: bool,
}

impl LoyaltyProgramDto {
    pub fn from_domain(program: LoyaltyProgram) -> Self {
        Self {
            id: program.id,
            name: program.name,
            points_per_unit_milli: program.points_per_unit_milli,
            min_redeem_points: program.min_redeem_points,
            redeem_value_minor: program.redeem_value.minor(),
            is_active: program.is_active,
        }
    }
}

// ── Occupancy ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportOccupancyRequest {
    pub facility_id: i32,
    pub space_number: i32,
    pub occupied: bool,
    pub battery_level: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancyReportDto {
    pub facility_id: i32,
    pub available_spaces: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancySampleDto {
    pub space_number: i32,
    pub occupied: bool,
    pub battery_level: Option<f64>,
    pub reported_at: DateTime<Utc>,
}

impl OccupancySampleDto {
    pub fn from_domain(sample: OccupancySample) -> Self {
        Self {
            space_number: sample.space_number,
            occupied: sample.occupied,
            battery_level: sample.battery_level,
            reported_at: sample.reported_at,
        }
    }
}

// ── Users ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct TopUpRequest {
    pub amount_minor: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WalletDto {
    pub user_id: i32,
    pub balance_minor: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddVehicleRequest {
    pub vehicle_type: String,
    pub license_plate: String,
    #[serde(default)]
    pub is_ev: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDto {
    pub id: i32,
    pub vehicle_type: String,
    pub license_plate: String,
    pub is_ev: bool,
    pub is_default: bool,
}

impl VehicleDto {
    pub fn from_domain(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            vehicle_type: vehicle.vehicle_type,
            license_plate: vehicle.license_plate,
            is_ev: vehicle.is_ev,
            is_default: vehicle.is_default,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkInstrumentRequest {
    /// `fastag` or `nfc`
    pub method: String,
    pub instrument_id: String,
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

// ── Tests ──────────────────────────────────────────────────────
