//! Application services

pub mod facility;
pub mod inventory;
pub mod loyalty;
pub mod occupancy;
pub mod payment;
pub mod pricing;
pub mod reservation;

pub use facility::{FacilityFilters, FacilityService, FacilitySpec};
pub use inventory::InventoryLedger;
pub use loyalty::LoyaltyService;
pub use occupancy::OccupancyService;
pub use payment::{Instrument, PaymentService};
pub use pricing::{PricingEngine, Quote};
pub use reservation::{BookingRequest, ReservationService};
