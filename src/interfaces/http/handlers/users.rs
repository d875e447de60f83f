//! User account API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::domain::PaymentMethod;
use crate::interfaces::http::dto::{
    reject, AddVehicleRequest, ApiResponse, EmptyData, LinkInstrumentRequest, PaymentDto,
    ReservationDto, TopUpRequest, VehicleDto, WalletDto,
};
use crate::shared::{DomainError, Money};

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/wallet/topup",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = TopUpRequest,
    responses(
        (status = 200, description = "Wallet credited", body = ApiResponse<WalletDto>),
        (status = 400, description = "Amount must be positive"),
        (status = 404, description = "User not found")
    )
)]
pub async fn top_up_wallet(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<TopUpRequest>,
) -> HandlerResult<WalletDto> {
    match state
        .facilities
        .top_up_wallet(user_id, Money::from_minor(body.amount_minor))
        .await
    {
        Ok(balance) => Ok(Json(ApiResponse::success(WalletDto {
            user_id,
            balance_minor: balance.minor(),
        }))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/reservations",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's reservations, newest first", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_user_reservations(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> HandlerResult<Vec<ReservationDto>> {
    match state.reservations.list_for_user(user_id).await {
        Ok(reservations) => Ok(Json(ApiResponse::success(
            reservations
                .into_iter()
                .map(ReservationDto::from_domain)
                .collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/payments",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's payment ledger, oldest first", body = ApiResponse<Vec<PaymentDto>>)
    )
)]
pub async fn list_user_payments(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> HandlerResult<Vec<PaymentDto>> {
    match state.storage.list_payments_for_user(user_id).await {
        Ok(payments) => Ok(Json(ApiResponse::success(
            payments.into_iter().map(PaymentDto::from_domain).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/vehicles",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = AddVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = ApiResponse<VehicleDto>),
        (status = 409, description = "Plate already registered")
    )
)]
pub async fn add_vehicle(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<AddVehicleRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<VehicleDto>>),
    (StatusCode, Json<ApiResponse<VehicleDto>>),
> {
    match state
        .facilities
        .add_vehicle(user_id, body.vehicle_type, body.license_plate, body.is_ev)
        .await
    {
        Ok(vehicle) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(VehicleDto::from_domain(vehicle))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/vehicles/{vehicle_id}",
    tag = "Users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("vehicle_id" = i32, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle removed", body = ApiResponse<EmptyData>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn remove_vehicle(
    State(state): State<AppState>,
    Path((user_id, vehicle_id)): Path<(i32, i32)>,
) -> HandlerResult<EmptyData> {
    match state.facilities.remove_vehicle(user_id, vehicle_id).await {
        Ok(()) => Ok(Json(ApiResponse::success(EmptyData {}))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/instruments",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = LinkInstrumentRequest,
    responses(
        (status = 200, description = "Instrument linked", body = ApiResponse<EmptyData>),
        (status = 400, description = "Not a linkable instrument")
    )
)]
pub async fn link_instrument(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<LinkInstrumentRequest>,
) -> HandlerResult<EmptyData> {
    let method = PaymentMethod::from_str(&body.method).ok_or_else(|| {
        reject::<EmptyData>(DomainError::InvalidInput(format!(
            "unknown payment method {}",
            body.method
        )))
    })?;
    match state
        .facilities
        .link_instrument(user_id, method, body.instrument_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(EmptyData {}))),
        Err(e) => Err(reject(e)),
    }
}
