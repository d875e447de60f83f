//! Loyalty API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::interfaces::http::dto::{
    reject, ApiResponse, LoyaltyProgramDto, RedeemPointsRequest, RedemptionDto,
    UpsertProgramRequest,
};
use crate::shared::Money;

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    get,
    path = "/api/v1/loyalty/program",
    tag = "Loyalty",
    responses(
        (status = 200, description = "Active program, if any", body = ApiResponse<Option<LoyaltyProgramDto>>)
    )
)]
pub async fn get_active_program(
    State(state): State<AppState>,
) -> HandlerResult<Option<LoyaltyProgramDto>> {
    match state.loyalty.get_active_program().await {
        Ok(program) => Ok(Json(ApiResponse::success(
            program.map(LoyaltyProgramDto::from_domain),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/loyalty/program",
    tag = "Loyalty",
    request_body = UpsertProgramRequest,
    responses(
        (status = 201, description = "Program saved", body = ApiResponse<LoyaltyProgramDto>),
        (status = 400, description = "Invalid rates"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn upsert_program(
    State(state): State<AppState>,
    Json(body): Json<UpsertProgramRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<LoyaltyProgramDto>>),
    (StatusCode, Json<ApiResponse<LoyaltyProgramDto>>),
> {
    match state
        .loyalty
        .upsert_program(
            body.admin_id,
            body.name,
            body.points_per_unit_milli,
            body.min_redeem_points,
            Money::from_minor(body.redeem_value_minor),
            body.is_active,
        )
        .await
    {
        Ok(program) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(LoyaltyProgramDto::from_domain(
                program,
            ))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/loyalty/redeem",
    tag = "Loyalty",
    request_body = RedeemPointsRequest,
    responses(
        (status = 200, description = "Points converted to wallet credit", body = ApiResponse<RedemptionDto>),
        (status = 404, description = "User or program not found"),
        (status = 422, description = "Below the redemption threshold")
    )
)]
pub async fn redeem_points(
    State(state): State<AppState>,
    Json(body): Json<RedeemPointsRequest>,
) -> HandlerResult<RedemptionDto> {
    match state.loyalty.redeem(body.user_id).await {
        Ok(redemption) => Ok(Json(ApiResponse::success(RedemptionDto::from_domain(
            redemption,
        )))),
        Err(e) => Err(reject(e)),
    }
}
