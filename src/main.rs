//! EasyDock booking & settlement service
//!
//! REST service for parking reservations, payment settlement and loyalty.
//! Reads configuration from a TOML file (`EASYDOCK_CONFIG` or
//! `easydock.toml`).

use std::sync::Arc;

use tracing::{error, info};

use easydock::application::{
    FacilityService, LoyaltyService, OccupancyService, PaymentService, ReservationService,
};
use easydock::infrastructure::{InMemoryStorage, LockManager, Storage};
use easydock::{create_api_router, create_event_bus, default_config_path, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("EASYDOCK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_logging(&cfg.logging.level);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_logging(&cfg.logging.level);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting EasyDock booking & settlement service...");

    // ── Wiring ─────────────────────────────────────────────────
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::with_seed_data());
    let locks = Arc::new(LockManager::new(config.server.lock_wait()));
    let event_bus = create_event_bus();

    let payments = Arc::new(PaymentService::new(
        config.payments.gateway_decline_probability,
    ));
    let loyalty = Arc::new(LoyaltyService::new(
        storage.clone(),
        locks.clone(),
        event_bus.clone(),
        config.loyalty.fallback_points_per_unit_milli,
    ));
    let reservations = Arc::new(ReservationService::new(
        storage.clone(),
        locks.clone(),
        event_bus.clone(),
        payments,
        loyalty.clone(),
    ));
    let facilities = Arc::new(FacilityService::new(
        storage.clone(),
        locks.clone(),
        event_bus.clone(),
        config.payments.default_revenue_share_bps,
    ));
    let occupancy = Arc::new(OccupancyService::new(
        storage.clone(),
        locks,
        event_bus,
    ));

    let app = create_api_router(AppState {
        storage,
        facilities,
        reservations,
        loyalty,
        occupancy,
    });

    // ── Serve ──────────────────────────────────────────────────
    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{} (Swagger UI at /docs)", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
