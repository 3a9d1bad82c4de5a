use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::{
    car_router, garage_router, maintenance_router, CarState, GarageState, MaintenanceState,
};
use crate::repositories::{
    CarGarageRepository, CarRepository, GarageRepository, MaintenanceRequestRepository,
};
use crate::services::ReportService;

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .unwrap(),
    );

    create_router(storage)
}

pub fn create_router(storage: Arc<Storage>) -> Router {
    let car_repository = Arc::new(CarRepository::new(storage.clone()));
    let garage_repository = Arc::new(GarageRepository::new(storage.clone()));
    let link_repository = Arc::new(CarGarageRepository::new(storage.clone()));
    let maintenance_repository = Arc::new(MaintenanceRequestRepository::new(storage.clone()));

    let report_service = Arc::new(ReportService::new(
        garage_repository.clone(),
        maintenance_repository.clone(),
    ));

    let cars = car_router(CarState {
        car_repository: car_repository.clone(),
        garage_repository: garage_repository.clone(),
        link_repository: link_repository.clone(),
        maintenance_repository: maintenance_repository.clone(),
    });

    let garages = garage_router(GarageState {
        garage_repository: garage_repository.clone(),
        link_repository: link_repository.clone(),
        maintenance_repository: maintenance_repository.clone(),
        report_service: report_service.clone(),
    });

    let maintenance = maintenance_router(MaintenanceState {
        car_repository,
        garage_repository,
        maintenance_repository,
        report_service,
    });

    Router::new()
        .merge(cars)
        .merge(garages)
        .merge(maintenance)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
