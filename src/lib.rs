//! # EasyDock Booking & Settlement Core
//!
//! Reservation, settlement and loyalty engine for a parking marketplace.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities and state machines
//! - **application**: Services implementing the use cases (pricing,
//!   inventory, reservations, payments, loyalty, occupancy)
//! - **infrastructure**: Storage port, in-memory store, lock manager
//! - **interfaces**: REST API with Swagger documentation
//! - **notifications**: Event bus for booking and payment events
//! - **shared**: Error taxonomy, fixed-point money, geo helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the API router and handler state
pub use interfaces::{create_api_router, AppState};

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};

// Re-export shared primitives
pub use shared::{DomainError, DomainResult, Money};
