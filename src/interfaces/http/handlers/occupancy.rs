//! Occupancy sensor API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::interfaces::http::dto::{
    reject, ApiResponse, OccupancyReportDto, ReportOccupancyRequest,
};

#[utoipa::path(
    post,
    path = "/api/v1/occupancy/report",
    tag = "Occupancy",
    request_body = ReportOccupancyRequest,
    responses(
        (status = 200, description = "Sample recorded and availability reconciled", body = ApiResponse<OccupancyReportDto>),
        (status = 400, description = "Space out of range"),
        (status = 404, description = "Facility not found")
    )
)]
pub async fn report_occupancy(
    State(state): State<AppState>,
    Json(body): Json<ReportOccupancyRequest>,
) -> Result<
    Json<ApiResponse<OccupancyReportDto>>,
    (StatusCode, Json<ApiResponse<OccupancyReportDto>>),
> {
    match state
        .occupancy
        .report(
            body.facility_id,
            body.space_number,
            body.occupied,
            body.battery_level,
        )
        .await
    {
        Ok(available_spaces) => Ok(Json(ApiResponse::success(OccupancyReportDto {
            facility_id: body.facility_id,
            available_spaces,
        }))),
        Err(e) => Err(reject(e)),
    }
}
