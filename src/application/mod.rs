//! Application layer - use cases over the storage and notification ports

pub mod services;

pub use services::{
    BookingRequest, FacilityFilters, FacilityService, FacilitySpec, InventoryLedger,
    LoyaltyService, OccupancyService, PaymentService, PricingEngine, Quote, ReservationService,
};
