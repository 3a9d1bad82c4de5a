use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{ApiError, GarageError};
use crate::models::Garage;
use crate::repositories::{CarGarageRepository, GarageRepository, MaintenanceRequestRepository};
use crate::services::{parse_date, DailyAvailability, ReportService};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGarageRequest {
    pub name: String,
    pub location: String,
    pub city: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGarageRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarageResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub city: String,
    pub capacity: i32,
}

impl From<Garage> for GarageResponse {
    fn from(garage: Garage) -> Self {
        Self {
            id: garage.id,
            name: garage.name,
            location: garage.location,
            city: garage.city,
            capacity: garage.capacity,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct GarageListQuery {
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DailyReportQuery {
    pub garage_id: i32,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone)]
pub struct GarageState {
    pub garage_repository: Arc<GarageRepository>,
    pub link_repository: Arc<CarGarageRepository>,
    pub maintenance_repository: Arc<MaintenanceRequestRepository>,
    pub report_service: Arc<ReportService>,
}

pub fn garage_router(garage_state: GarageState) -> Router {
    Router::new()
        .route("/garages", get(get_garages).post(create_garage))
        .route(
            "/garages/dailyAvailabilityReport",
            get(daily_availability_report),
        )
        .route(
            "/garages/:garage_id",
            get(get_garage_by_id).put(update_garage).delete(delete_garage),
        )
        .with_state(garage_state)
}

#[utoipa::path(
    get,
    path = "/garages/{garage_id}",
    tag = "garage",
    params(("garage_id" = i32, Path, description = "Garage id")),
    responses(
        (status = 200, description = "Garage found", body = GarageResponse),
        (status = 404, description = "Garage not found")
    )
)]
pub async fn get_garage_by_id(
    Path(garage_id): Path<i32>,
    State(state): State<GarageState>,
) -> Result<Json<GarageResponse>, ApiError> {
    let garage = state
        .garage_repository
        .find_by_id(garage_id)
        .await?
        .ok_or(GarageError::GarageNotFound)?;

    Ok(Json(garage.into()))
}

#[utoipa::path(
    get,
    path = "/garages",
    tag = "garage",
    params(GarageListQuery),
    responses(
        (status = 200, description = "Matching garages", body = [GarageResponse]),
        (status = 404, description = "No garages found")
    )
)]
pub async fn get_garages(
    Query(query): Query<GarageListQuery>,
    State(state): State<GarageState>,
) -> Result<Json<Vec<GarageResponse>>, ApiError> {
    let garages = state
        .garage_repository
        .find_all(query.city.as_deref())
        .await?;

    // Empty list endpoints answer 404, preserved from the original system.
    if garages.is_empty() {
        return Err(GarageError::NoGaragesFound.into());
    }

    Ok(Json(garages.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/garages",
    tag = "garage",
    request_body = CreateGarageRequest,
    responses(
        (status = 200, description = "Garage created", body = GarageResponse),
        (status = 400, description = "Invalid capacity")
    )
)]
pub async fn create_garage(
    State(state): State<GarageState>,
    Json(body): Json<CreateGarageRequest>,
) -> Result<Json<GarageResponse>, ApiError> {
    if body.capacity < 1 {
        return Err(GarageError::InvalidCapacity.into());
    }

    let garage = Garage {
        id: 0,
        name: body.name,
        location: body.location,
        city: body.city,
        capacity: body.capacity,
    };

    let mut tx = state.garage_repository.get_pool().begin().await?;
    let id = state.garage_repository.create(&garage, &mut tx).await?;
    tx.commit().await?;

    let created = state
        .garage_repository
        .find_by_id(id)
        .await?
        .ok_or(GarageError::GarageNotFound)?;

    Ok(Json(created.into()))
}

#[utoipa::path(
    put,
    path = "/garages/{garage_id}",
    tag = "garage",
    params(("garage_id" = i32, Path, description = "Garage id")),
    request_body = UpdateGarageRequest,
    responses(
        (status = 200, description = "Garage updated", body = GarageResponse),
        (status = 400, description = "Invalid capacity"),
        (status = 404, description = "Garage not found")
    )
)]
pub async fn update_garage(
    Path(garage_id): Path<i32>,
    State(state): State<GarageState>,
    Json(body): Json<UpdateGarageRequest>,
) -> Result<Json<GarageResponse>, ApiError> {
    let mut garage = state
        .garage_repository
        .find_by_id(garage_id)
        .await?
        .ok_or(GarageError::GarageNotFound)?;

    if let Some(name) = body.name {
        garage.name = name;
    }
    if let Some(location) = body.location {
        garage.location = location;
    }
    if let Some(city) = body.city {
        garage.city = city;
    }
    if let Some(capacity) = body.capacity {
        if capacity < 1 {
            return Err(GarageError::InvalidCapacity.into());
        }
        garage.capacity = capacity;
    }

    let mut tx = state.garage_repository.get_pool().begin().await?;
    state
        .garage_repository
        .update(garage_id, &garage, &mut tx)
        .await?;
    tx.commit().await?;

    Ok(Json(garage.into()))
}

#[utoipa::path(
    delete,
    path = "/garages/{garage_id}",
    tag = "garage",
    params(("garage_id" = i32, Path, description = "Garage id")),
    responses(
        (status = 200, description = "Garage deleted"),
        (status = 404, description = "Garage not found")
    )
)]
pub async fn delete_garage(
    Path(garage_id): Path<i32>,
    State(state): State<GarageState>,
) -> Result<Json<Value>, ApiError> {
    state
        .garage_repository
        .find_by_id(garage_id)
        .await?
        .ok_or(GarageError::GarageNotFound)?;

    // Dependent requests and links go first; the schema enforces no cascade.
    let mut tx = state.garage_repository.get_pool().begin().await?;
    state
        .maintenance_repository
        .delete_by_garage(garage_id, &mut tx)
        .await?;
    state
        .link_repository
        .delete_by_garage(garage_id, &mut tx)
        .await?;
    state.garage_repository.delete(garage_id, &mut tx).await?;
    tx.commit().await?;

    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    get,
    path = "/garages/dailyAvailabilityReport",
    tag = "garage",
    params(DailyReportQuery),
    responses(
        (status = 200, description = "Per-day remaining capacity", body = [DailyAvailability]),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Garage not found")
    )
)]
pub async fn daily_availability_report(
    Query(query): Query<DailyReportQuery>,
    State(state): State<GarageState>,
) -> Result<Json<Vec<DailyAvailability>>, ApiError> {
    let start = parse_date(&query.start_date).ok_or(GarageError::InvalidDateFormat)?;
    let end = parse_date(&query.end_date).ok_or(GarageError::InvalidDateFormat)?;

    let report = state
        .report_service
        .daily_availability(query.garage_id, start, end)
        .await?;

    Ok(Json(report))
}
