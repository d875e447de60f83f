//! Domain entities

pub mod facility;
pub mod loyalty;
pub mod payment;
pub mod reservation;
pub mod sensor;
pub mod user;

// Re-export commonly used types
pub use facility::{Facility, VerificationStatus};
pub use loyalty::{LoyaltyProgram, Redemption};
pub use payment::{Payment, PaymentMethod};
pub use reservation::{Reservation, ReservationStatus};
pub use sensor::OccupancySample;
pub use user::{User, UserRole, Vehicle};
