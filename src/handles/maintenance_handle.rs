use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::Date;
use utoipa::{IntoParams, ToSchema};

use crate::errors::{ApiError, CarError, GarageError, MaintenanceError};
use crate::models::MaintenanceRequest;
use crate::repositories::{
    CarRepository, GarageRepository, MaintenanceFilter, MaintenanceRequestRepository,
};
use crate::services::{parse_date, parse_year_month, MonthlyRequests, ReportService};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub car_id: i32,
    pub garage_id: i32,
    pub service_type: String,
    pub scheduled_date: Date,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    pub car_id: Option<i32>,
    pub garage_id: Option<i32>,
    pub service_type: Option<String>,
    pub scheduled_date: Option<Date>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponse {
    pub id: i32,
    pub car_id: i32,
    pub car_name: String,
    pub garage_id: i32,
    pub garage_name: String,
    pub service_type: String,
    pub scheduled_date: Date,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MaintenanceListQuery {
    pub car_id: Option<i32>,
    pub garage_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MonthlyReportQuery {
    pub garage_id: i32,
    pub start_month: String,
    pub end_month: String,
}

#[derive(Clone)]
pub struct MaintenanceState {
    pub car_repository: Arc<CarRepository>,
    pub garage_repository: Arc<GarageRepository>,
    pub maintenance_repository: Arc<MaintenanceRequestRepository>,
    pub report_service: Arc<ReportService>,
}

pub fn maintenance_router(maintenance_state: MaintenanceState) -> Router {
    Router::new()
        .route(
            "/maintenance",
            get(get_maintenance_list).post(create_maintenance),
        )
        .route(
            "/maintenance/monthlyRequestsReport",
            get(monthly_requests_report),
        )
        .route(
            "/maintenance/:request_id",
            get(get_maintenance_by_id)
                .put(update_maintenance)
                .delete(delete_maintenance),
        )
        .with_state(maintenance_state)
}

/// Resolves the denormalized display names. A dangling reference means the
/// write-time validation was bypassed, so it surfaces as a server error.
async fn maintenance_response(
    state: &MaintenanceState,
    request: MaintenanceRequest,
) -> Result<MaintenanceResponse, ApiError> {
    let car = state
        .car_repository
        .find_by_id(request.car_id)
        .await?
        .ok_or_else(|| {
            anyhow!(
                "maintenance request {} references missing car {}",
                request.id,
                request.car_id
            )
        })?;

    let garage = state
        .garage_repository
        .find_by_id(request.garage_id)
        .await?
        .ok_or_else(|| {
            anyhow!(
                "maintenance request {} references missing garage {}",
                request.id,
                request.garage_id
            )
        })?;

    Ok(MaintenanceResponse {
        id: request.id,
        car_id: request.car_id,
        car_name: car.make,
        garage_id: request.garage_id,
        garage_name: garage.name,
        service_type: request.service_type,
        scheduled_date: request.scheduled_date,
    })
}

#[utoipa::path(
    get,
    path = "/maintenance/{request_id}",
    tag = "maintenance",
    params(("request_id" = i32, Path, description = "Maintenance request id")),
    responses(
        (status = 200, description = "Maintenance request with display names", body = MaintenanceResponse),
        (status = 404, description = "Maintenance record not found"),
        (status = 500, description = "Request references a missing car or garage")
    )
)]
pub async fn get_maintenance_by_id(
    Path(request_id): Path<i32>,
    State(state): State<MaintenanceState>,
) -> Result<Json<MaintenanceResponse>, ApiError> {
    let request = state
        .maintenance_repository
        .find_by_id(request_id)
        .await?
        .ok_or(MaintenanceError::MaintenanceNotFound)?;

    Ok(Json(maintenance_response(&state, request).await?))
}

#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    params(MaintenanceListQuery),
    responses(
        (status = 200, description = "Matching maintenance requests", body = [MaintenanceResponse]),
        (status = 400, description = "Malformed date filter"),
        (status = 404, description = "No maintenance records found")
    )
)]
pub async fn get_maintenance_list(
    Query(query): Query<MaintenanceListQuery>,
    State(state): State<MaintenanceState>,
) -> Result<Json<Vec<MaintenanceResponse>>, ApiError> {
    let start_date = query
        .start_date
        .as_deref()
        .map(|raw| parse_date(raw).ok_or(MaintenanceError::InvalidDateFormat))
        .transpose()?;
    let end_date = query
        .end_date
        .as_deref()
        .map(|raw| parse_date(raw).ok_or(MaintenanceError::InvalidDateFormat))
        .transpose()?;

    let filter = MaintenanceFilter {
        car_id: query.car_id,
        garage_id: query.garage_id,
        start_date,
        end_date,
    };

    let requests = state
        .maintenance_repository
        .find_with_filters(&filter)
        .await?;

    // Empty list endpoints answer 404, preserved from the original system.
    if requests.is_empty() {
        return Err(MaintenanceError::NoMaintenanceFound.into());
    }

    let mut response = Vec::with_capacity(requests.len());
    for request in requests {
        response.push(maintenance_response(&state, request).await?);
    }

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 200, description = "Maintenance request created", body = MaintenanceResponse),
        (status = 400, description = "Empty service type or no free capacity"),
        (status = 404, description = "Car or garage not found")
    )
)]
pub async fn create_maintenance(
    State(state): State<MaintenanceState>,
    Json(body): Json<CreateMaintenanceRequest>,
) -> Result<Json<MaintenanceResponse>, ApiError> {
    state
        .car_repository
        .find_by_id(body.car_id)
        .await?
        .ok_or(CarError::CarNotFound)?;

    let garage = state
        .garage_repository
        .find_by_id(body.garage_id)
        .await?
        .ok_or(GarageError::GarageNotFound)?;

    if body.service_type.trim().is_empty() {
        return Err(MaintenanceError::EmptyServiceType.into());
    }

    // Read-then-write capacity check; concurrent writers may still jointly
    // exceed capacity (accepted).
    let booked = state
        .maintenance_repository
        .count_for_garage_on_date(body.garage_id, body.scheduled_date)
        .await?;
    if booked >= garage.capacity as i64 {
        return Err(MaintenanceError::CapacityExceeded.into());
    }

    let request = MaintenanceRequest {
        id: 0,
        car_id: body.car_id,
        garage_id: body.garage_id,
        service_type: body.service_type,
        scheduled_date: body.scheduled_date,
    };

    let mut tx = state.maintenance_repository.get_pool().begin().await?;
    let id = state
        .maintenance_repository
        .create(&request, &mut tx)
        .await?;
    tx.commit().await?;

    let created = state
        .maintenance_repository
        .find_by_id(id)
        .await?
        .ok_or(MaintenanceError::MaintenanceNotFound)?;

    Ok(Json(maintenance_response(&state, created).await?))
}

#[utoipa::path(
    put,
    path = "/maintenance/{request_id}",
    tag = "maintenance",
    params(("request_id" = i32, Path, description = "Maintenance request id")),
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Maintenance request updated", body = MaintenanceResponse),
        (status = 400, description = "Empty service type or no free capacity"),
        (status = 404, description = "Record, car or garage not found")
    )
)]
pub async fn update_maintenance(
    Path(request_id): Path<i32>,
    State(state): State<MaintenanceState>,
    Json(body): Json<UpdateMaintenanceRequest>,
) -> Result<Json<MaintenanceResponse>, ApiError> {
    let mut request = state
        .maintenance_repository
        .find_by_id(request_id)
        .await?
        .ok_or(MaintenanceError::MaintenanceNotFound)?;

    if let Some(car_id) = body.car_id {
        request.car_id = car_id;
    }
    if let Some(garage_id) = body.garage_id {
        request.garage_id = garage_id;
    }
    if let Some(service_type) = body.service_type {
        if service_type.trim().is_empty() {
            return Err(MaintenanceError::EmptyServiceType.into());
        }
        request.service_type = service_type;
    }
    if let Some(scheduled_date) = body.scheduled_date {
        request.scheduled_date = scheduled_date;
    }

    state
        .car_repository
        .find_by_id(request.car_id)
        .await?
        .ok_or(CarError::CarNotFound)?;

    let garage = state
        .garage_repository
        .find_by_id(request.garage_id)
        .await?
        .ok_or(GarageError::GarageNotFound)?;

    // The record under edit does not count against its own slot, so a
    // re-save at full capacity goes through.
    let booked = state
        .maintenance_repository
        .count_for_garage_on_date_excluding(request.garage_id, request.scheduled_date, request_id)
        .await?;
    if booked >= garage.capacity as i64 {
        return Err(MaintenanceError::CapacityExceeded.into());
    }

    let mut tx = state.maintenance_repository.get_pool().begin().await?;
    state
        .maintenance_repository
        .update(request_id, &request, &mut tx)
        .await?;
    tx.commit().await?;

    Ok(Json(maintenance_response(&state, request).await?))
}

#[utoipa::path(
    delete,
    path = "/maintenance/{request_id}",
    tag = "maintenance",
    params(("request_id" = i32, Path, description = "Maintenance request id")),
    responses(
        (status = 200, description = "Maintenance request deleted"),
        (status = 404, description = "Maintenance record not found")
    )
)]
pub async fn delete_maintenance(
    Path(request_id): Path<i32>,
    State(state): State<MaintenanceState>,
) -> Result<Json<Value>, ApiError> {
    state
        .maintenance_repository
        .find_by_id(request_id)
        .await?
        .ok_or(MaintenanceError::MaintenanceNotFound)?;

    let mut tx = state.maintenance_repository.get_pool().begin().await?;
    state
        .maintenance_repository
        .delete(request_id, &mut tx)
        .await?;
    tx.commit().await?;

    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    get,
    path = "/maintenance/monthlyRequestsReport",
    tag = "maintenance",
    params(MonthlyReportQuery),
    responses(
        (status = 200, description = "Per-month request counts", body = [MonthlyRequests]),
        (status = 400, description = "Malformed month"),
        (status = 404, description = "Garage not found")
    )
)]
pub async fn monthly_requests_report(
    Query(query): Query<MonthlyReportQuery>,
    State(state): State<MaintenanceState>,
) -> Result<Json<Vec<MonthlyRequests>>, ApiError> {
    let start =
        parse_year_month(&query.start_month).ok_or(MaintenanceError::InvalidMonthFormat)?;
    let end = parse_year_month(&query.end_month).ok_or(MaintenanceError::InvalidMonthFormat)?;

    let report = state
        .report_service
        .monthly_requests(query.garage_id, start, end)
        .await?;

    Ok(Json(report))
}
