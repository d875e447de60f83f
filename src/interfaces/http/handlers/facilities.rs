//! Facility API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::interfaces::http::dto::{
    reject, ApiResponse, FacilityDto, FacilityQuery, NearbyQuery, OccupancySampleDto,
    RegisterFacilityRequest, VerifyFacilityRequest,
};

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    get,
    path = "/api/v1/facilities",
    tag = "Facilities",
    params(FacilityQuery),
    responses(
        (status = 200, description = "Facilities matching the filters", body = ApiResponse<Vec<FacilityDto>>)
    )
)]
pub async fn list_facilities(
    State(state): State<AppState>,
    Query(query): Query<FacilityQuery>,
) -> HandlerResult<Vec<FacilityDto>> {
    match state.facilities.list(&query.into_filters()).await {
        Ok(facilities) => Ok(Json(ApiResponse::success(
            facilities.into_iter().map(FacilityDto::from_domain).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/nearby",
    tag = "Facilities",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Facilities within the radius, nearest first", body = ApiResponse<Vec<FacilityDto>>),
        (status = 400, description = "Invalid radius")
    )
)]
pub async fn nearby_facilities(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> HandlerResult<Vec<FacilityDto>> {
    let filters = crate::application::FacilityFilters {
        requires_ev_charging: query.ev_charging,
        ..Default::default()
    };
    match state
        .facilities
        .nearby(query.latitude, query.longitude, query.radius_km, &filters)
        .await
    {
        Ok(hits) => Ok(Json(ApiResponse::success(
            hits.into_iter()
                .map(|(f, d)| FacilityDto::with_distance(f, d))
                .collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/{facility_id}",
    tag = "Facilities",
    params(("facility_id" = i32, Path, description = "Facility ID")),
    responses(
        (status = 200, description = "Facility detail", body = ApiResponse<FacilityDto>),
        (status = 404, description = "Facility not found")
    )
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i32>,
) -> HandlerResult<FacilityDto> {
    match state.facilities.get(facility_id).await {
        Ok(facility) => Ok(Json(ApiResponse::success(FacilityDto::from_domain(
            facility,
        )))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/facilities",
    tag = "Facilities",
    request_body = RegisterFacilityRequest,
    responses(
        (status = 201, description = "Facility registered, pending verification", body = ApiResponse<FacilityDto>),
        (status = 400, description = "Invalid listing"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn register_facility(
    State(state): State<AppState>,
    Json(body): Json<RegisterFacilityRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<FacilityDto>>),
    (StatusCode, Json<ApiResponse<FacilityDto>>),
> {
    let (owner_id, spec) = body.into_spec();
    match state.facilities.register(owner_id, spec).await {
        Ok(facility) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(FacilityDto::from_domain(facility))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/facilities/{facility_id}/verify",
    tag = "Facilities",
    params(("facility_id" = i32, Path, description = "Facility ID")),
    request_body = VerifyFacilityRequest,
    responses(
        (status = 200, description = "Verification decided", body = ApiResponse<FacilityDto>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Facility not found")
    )
)]
pub async fn verify_facility(
    State(state): State<AppState>,
    Path(facility_id): Path<i32>,
    Json(body): Json<VerifyFacilityRequest>,
) -> HandlerResult<FacilityDto> {
    match state
        .facilities
        .verify(body.admin_id, facility_id, body.approve, body.notes)
        .await
    {
        Ok(facility) => Ok(Json(ApiResponse::success(FacilityDto::from_domain(
            facility,
        )))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/{facility_id}/occupancy",
    tag = "Occupancy",
    params(("facility_id" = i32, Path, description = "Facility ID")),
    responses(
        (status = 200, description = "Latest per-space sensor samples", body = ApiResponse<Vec<OccupancySampleDto>>)
    )
)]
pub async fn facility_occupancy(
    State(state): State<AppState>,
    Path(facility_id): Path<i32>,
) -> HandlerResult<Vec<OccupancySampleDto>> {
    match state.occupancy.samples(facility_id).await {
        Ok(samples) => Ok(Json(ApiResponse::success(
            samples
                .into_iter()
                .map(OccupancySampleDto::from_domain)
                .collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}
