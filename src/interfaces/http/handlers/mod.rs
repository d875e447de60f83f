//! Request handlers for all resources

pub mod facilities;
pub mod health;
pub mod loyalty;
pub mod occupancy;
pub mod reservations;
pub mod users;

use std::sync::Arc;

use crate::application::{FacilityService, LoyaltyService, OccupancyService, ReservationService};
use crate::infrastructure::Storage;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub facilities: Arc<FacilityService>,
    pub reservations: Arc<ReservationService>,
    pub loyalty: Arc<LoyaltyService>,
    pub occupancy: Arc<OccupancyService>,
}
