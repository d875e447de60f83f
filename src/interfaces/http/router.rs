//! API Router with Swagger UI

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::*;
use super::handlers::{
    facilities, health, loyalty, occupancy, reservations, users, AppState,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Facilities
        facilities::list_facilities,
        facilities::nearby_facilities,
        facilities::get_facility,
        facilities::register_facility,
        facilities::verify_facility,
        facilities::facility_occupancy,
        // Reservations
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::pay_reservation,
        reservations::extend_reservation,
        reservations::cancel_reservation,
        // Loyalty
        loyalty::get_active_program,
        loyalty::upsert_program,
        loyalty::redeem_points,
        // Occupancy
        occupancy::report_occupancy,
        // Users
        users::top_up_wallet,
        users::list_user_reservations,
        users::list_user_payments,
        users::add_vehicle,
        users::remove_vehicle,
        users::link_instrument,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            // Facilities
            FacilityDto,
            RegisterFacilityRequest,
            VerifyFacilityRequest,
            // Reservations
            ReservationDto,
            CreateReservationRequest,
            PayReservationRequest,
            ExtendReservationRequest,
            PaymentDto,
            RefundDto,
            // Loyalty
            LoyaltyProgramDto,
            UpsertProgramRequest,
            RedeemPointsRequest,
            RedemptionDto,
            // Occupancy
            ReportOccupancyRequest,
            OccupancyReportDto,
            OccupancySampleDto,
            // Users
            TopUpRequest,
            WalletDto,
            AddVehicleRequest,
            VehicleDto,
            LinkInstrumentRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Facilities", description = "Facility listings, registration and verification"),
        (name = "Reservations", description = "Booking lifecycle: create, pay, extend, cancel"),
        (name = "Loyalty", description = "Reward points: program management and redemption"),
        (name = "Occupancy", description = "Sensor-driven occupancy reconciliation"),
        (name = "Users", description = "Wallet, vehicles and payment instruments"),
    ),
    info(
        title = "EasyDock Booking & Settlement API",
        version = "1.0.0",
        description = "REST API for parking reservations, settlement and loyalty",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let facility_routes = Router::new()
        .route(
            "/",
            get(facilities::list_facilities).post(facilities::register_facility),
        )
        .route("/nearby", get(facilities::nearby_facilities))
        .route("/{facility_id}", get(facilities::get_facility))
        .route("/{facility_id}/verify", post(facilities::verify_facility))
        .route(
            "/{facility_id}/occupancy",
            get(facilities::facility_occupancy),
        );

    let reservation_routes = Router::new()
        .route("/", post(reservations::create_reservation))
        .route("/{reservation_id}", get(reservations::get_reservation))
        .route("/{reservation_id}/pay", post(reservations::pay_reservation))
        .route(
            "/{reservation_id}/extend",
            post(reservations::extend_reservation),
        )
        .route(
            "/{reservation_id}/cancel",
            post(reservations::cancel_reservation),
        );

    let loyalty_routes = Router::new()
        .route(
            "/program",
            get(loyalty::get_active_program).post(loyalty::upsert_program),
        )
        .route("/redeem", post(loyalty::redeem_points));

    let occupancy_routes = Router::new().route("/report", post(occupancy::report_occupancy));

    let user_routes = Router::new()
        .route("/{user_id}/wallet/topup", post(users::top_up_wallet))
        .route("/{user_id}/reservations", get(users::list_user_reservations))
        .route("/{user_id}/payments", get(users::list_user_payments))
        .route("/{user_id}/vehicles", post(users::add_vehicle))
        .route(
            "/{user_id}/vehicles/{vehicle_id}",
            delete(users::remove_vehicle),
        )
        .route("/{user_id}/instruments", post(users::link_instrument));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/facilities", facility_routes)
        .nest("/api/v1/reservations", reservation_routes)
        .nest("/api/v1/loyalty", loyalty_routes)
        .nest("/api/v1/occupancy", occupancy_routes)
        .nest("/api/v1/users", user_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
