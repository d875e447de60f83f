//! Reservation API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::application::BookingRequest;
use crate::domain::PaymentMethod;
use crate::interfaces::http::dto::{
    reject, ApiResponse, CreateReservationRequest, ExtendReservationRequest,
    PayReservationRequest, PaymentDto, RefundDto, ReservationDto,
};
use crate::shared::DomainError;

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn parse_method<T>(s: &str) -> Result<PaymentMethod, (StatusCode, Json<ApiResponse<T>>)> {
    PaymentMethod::from_str(s)
        .ok_or_else(|| reject(DomainError::InvalidInput(format!("unknown payment method {}", s))))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created, payment outstanding", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid booking"),
        (status = 404, description = "User or facility not found"),
        (status = 409, description = "No available spaces")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(body): Json<CreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ReservationDto>>),
    (StatusCode, Json<ApiResponse<ReservationDto>>),
> {
    let request = BookingRequest {
        user_id: body.user_id,
        facility_id: body.facility_id,
        start_time: body.start_time,
        end_time: body.end_time,
        vehicle_type: body.vehicle_type,
        license_plate: body.license_plate,
        use_ev_charging: body.use_ev_charging,
    };
    match state.reservations.create(request).await {
        Ok(reservation) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ReservationDto::from_domain(
                reservation,
            ))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation detail", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
) -> HandlerResult<ReservationDto> {
    match state.reservations.get(reservation_id).await {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from_domain(
            reservation,
        )))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/pay",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    request_body = PayReservationRequest,
    responses(
        (status = 200, description = "Payment settled", body = ApiResponse<PaymentDto>),
        (status = 402, description = "Gateway declined, retryable"),
        (status = 409, description = "Already settled"),
        (status = 422, description = "Insufficient funds or instrument not linked")
    )
)]
pub async fn pay_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
    Json(body): Json<PayReservationRequest>,
) -> HandlerResult<PaymentDto> {
    let method = parse_method(&body.method)?;
    match state.reservations.settle(reservation_id, method).await {
        Ok(payment) => Ok(Json(ApiResponse::success(PaymentDto::from_domain(payment)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/extend",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    request_body = ExtendReservationRequest,
    responses(
        (status = 200, description = "End time moved out", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Reservation cannot be extended"),
        (status = 409, description = "No free capacity")
    )
)]
pub async fn extend_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
    Json(body): Json<ExtendReservationRequest>,
) -> HandlerResult<ReservationDto> {
    match state
        .reservations
        .extend(reservation_id, body.additional_hours)
        .await
    {
        Ok(reservation) => Ok(Json(ApiResponse::success(ReservationDto::from_domain(
            reservation,
        )))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/cancel",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Cancelled; refund amount included", body = ApiResponse<RefundDto>),
        (status = 400, description = "Already cancelled"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
) -> HandlerResult<RefundDto> {
    match state.reservations.cancel(reservation_id).await {
        Ok(refund) => Ok(Json(ApiResponse::success(RefundDto {
            reservation_id,
            refund_minor: refund.minor(),
        }))),
        Err(e) => Err(reject(e)),
    }
}
