use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{ApiError, CarError, GarageError};
use crate::handles::garage_handle::GarageResponse;
use crate::models::Car;
use crate::repositories::{
    CarFilter, CarGarageRepository, CarRepository, GarageRepository, MaintenanceRequestRepository,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    pub make: String,
    pub model: String,
    pub production_year: i32,
    pub license_plate: String,
    #[serde(default)]
    pub garage_ids: Vec<i32>,
}

/// Patch semantics: absent scalar fields keep their value; `garageIds`
/// present (even empty) replaces the whole association set, absent leaves
/// it untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub production_year: Option<i32>,
    pub license_plate: Option<String>,
    pub garage_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub production_year: i32,
    pub license_plate: String,
    pub garages: Vec<GarageResponse>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CarListQuery {
    pub car_make: Option<String>,
    pub garage_id: Option<i32>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}

#[derive(Clone)]
pub struct CarState {
    pub car_repository: Arc<CarRepository>,
    pub garage_repository: Arc<GarageRepository>,
    pub link_repository: Arc<CarGarageRepository>,
    pub maintenance_repository: Arc<MaintenanceRequestRepository>,
}

pub fn car_router(car_state: CarState) -> Router {
    Router::new()
        .route("/cars", get(get_cars).post(create_car))
        .route(
            "/cars/:car_id",
            get(get_car_by_id).put(update_car).delete(delete_car),
        )
        .with_state(car_state)
}

async fn car_response(state: &CarState, car: Car) -> Result<CarResponse, ApiError> {
    let garages = state.link_repository.find_garages_by_car(car.id).await?;

    Ok(CarResponse {
        id: car.id,
        make: car.make,
        model: car.model,
        production_year: car.production_year,
        license_plate: car.license_plate,
        garages: garages.into_iter().map(Into::into).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/cars/{car_id}",
    tag = "car",
    params(("car_id" = i32, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car with resolved garages", body = CarResponse),
        (status = 404, description = "Car not found")
    )
)]
pub async fn get_car_by_id(
    Path(car_id): Path<i32>,
    State(state): State<CarState>,
) -> Result<Json<CarResponse>, ApiError> {
    let car = state
        .car_repository
        .find_by_id(car_id)
        .await?
        .ok_or(CarError::CarNotFound)?;

    Ok(Json(car_response(&state, car).await?))
}

#[utoipa::path(
    get,
    path = "/cars",
    tag = "car",
    params(CarListQuery),
    responses(
        (status = 200, description = "Matching cars", body = [CarResponse]),
        (status = 404, description = "No cars found")
    )
)]
pub async fn get_cars(
    Query(query): Query<CarListQuery>,
    State(state): State<CarState>,
) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let filter = CarFilter {
        make: query.car_make,
        garage_id: query.garage_id,
        year_from: query.from_year,
        year_to: query.to_year,
    };

    let cars = state.car_repository.find_with_filters(&filter).await?;

    // Empty list endpoints answer 404, preserved from the original system.
    if cars.is_empty() {
        return Err(CarError::NoCarsFound.into());
    }

    let mut response = Vec::with_capacity(cars.len());
    for car in cars {
        response.push(car_response(&state, car).await?);
    }

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/cars",
    tag = "car",
    request_body = CreateCarRequest,
    responses(
        (status = 200, description = "Car created with its garage links", body = CarResponse),
        (status = 404, description = "A referenced garage does not exist")
    )
)]
pub async fn create_car(
    State(state): State<CarState>,
    Json(body): Json<CreateCarRequest>,
) -> Result<Json<CarResponse>, ApiError> {
    for garage_id in &body.garage_ids {
        state
            .garage_repository
            .find_by_id(*garage_id)
            .await?
            .ok_or(GarageError::GarageNotFound)?;
    }

    let car = Car {
        id: 0,
        make: body.make,
        model: body.model,
        production_year: body.production_year,
        license_plate: body.license_plate,
    };

    let mut tx = state.car_repository.get_pool().begin().await?;
    let car_id = state.car_repository.create(&car, &mut tx).await?;
    for garage_id in &body.garage_ids {
        state
            .link_repository
            .create(car_id, *garage_id, &mut tx)
            .await?;
    }
    tx.commit().await?;

    let created = state
        .car_repository
        .find_by_id(car_id)
        .await?
        .ok_or(CarError::CarNotFound)?;

    Ok(Json(car_response(&state, created).await?))
}

#[utoipa::path(
    put,
    path = "/cars/{car_id}",
    tag = "car",
    params(("car_id" = i32, Path, description = "Car id")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Car updated", body = CarResponse),
        (status = 404, description = "Car or referenced garage not found")
    )
)]
pub async fn update_car(
    Path(car_id): Path<i32>,
    State(state): State<CarState>,
    Json(body): Json<UpdateCarRequest>,
) -> Result<Json<CarResponse>, ApiError> {
    let mut car = state
        .car_repository
        .find_by_id(car_id)
        .await?
        .ok_or(CarError::CarNotFound)?;

    if let Some(make) = body.make {
        car.make = make;
    }
    if let Some(model) = body.model {
        car.model = model;
    }
    if let Some(production_year) = body.production_year {
        car.production_year = production_year;
    }
    if let Some(license_plate) = body.license_plate {
        car.license_plate = license_plate;
    }

    if let Some(garage_ids) = &body.garage_ids {
        for garage_id in garage_ids {
            state
                .garage_repository
                .find_by_id(*garage_id)
                .await?
                .ok_or(GarageError::GarageNotFound)?;
        }
    }

    let mut tx = state.car_repository.get_pool().begin().await?;
    state.car_repository.update(car_id, &car, &mut tx).await?;

    // Full replacement of the association set, delete-all-then-insert.
    if let Some(garage_ids) = &body.garage_ids {
        state.link_repository.delete_by_car(car_id, &mut tx).await?;
        for garage_id in garage_ids {
            state
                .link_repository
                .create(car_id, *garage_id, &mut tx)
                .await?;
        }
    }
    tx.commit().await?;

    Ok(Json(car_response(&state, car).await?))
}

#[utoipa::path(
    delete,
    path = "/cars/{car_id}",
    tag = "car",
    params(("car_id" = i32, Path, description = "Car id")),
    responses(
        (status = 200, description = "Deleted car in its pre-deletion shape", body = CarResponse),
        (status = 404, description = "Car not found")
    )
)]
pub async fn delete_car(
    Path(car_id): Path<i32>,
    State(state): State<CarState>,
) -> Result<Json<CarResponse>, ApiError> {
    let car = state
        .car_repository
        .find_by_id(car_id)
        .await?
        .ok_or(CarError::CarNotFound)?;

    let response = car_response(&state, car).await?;

    // Dependent requests and links go first; the schema enforces no cascade.
    let mut tx = state.car_repository.get_pool().begin().await?;
    state
        .maintenance_repository
        .delete_by_car(car_id, &mut tx)
        .await?;
    state.link_repository.delete_by_car(car_id, &mut tx).await?;
    state.car_repository.delete(car_id, &mut tx).await?;
    tx.commit().await?;

    Ok(Json(response))
}
