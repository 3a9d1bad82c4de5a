use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use fleetcare_server::app::create_router;
use fleetcare_server::configs::schema::SchemaManager;
use fleetcare_server::configs::settings::Database;
use fleetcare_server::configs::storage::Storage;
use fleetcare_server::models::car::Car;
use fleetcare_server::models::garage::Garage;
use fleetcare_server::models::maintenance_request::MaintenanceRequest;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let router = create_router(storage.clone());

        Self { storage, router }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder()
            .uri(uri)
            .method(method)
            .header("Content-Type", "application/json");

        let request = match body {
            Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn create_test_garage(&self, name: &str, city: &str, capacity: i32) -> Garage {
        sqlx::query_as::<_, Garage>(
            r#"
            INSERT INTO garages (name, location, city, capacity)
                VALUES ($1, '1 Service Rd', $2, $3)
                RETURNING *;
            "#,
        )
        .bind(name)
        .bind(city)
        .bind(capacity)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn create_test_car(&self, make: &str, plate: &str) -> Car {
        sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (make, model, production_year, license_plate)
                VALUES ($1, 'Octavia', 2019, $2)
                RETURNING *;
            "#,
        )
        .bind(make)
        .bind(plate)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn link_car_to_garage(&self, car_id: i32, garage_id: i32) {
        sqlx::query("INSERT INTO cars_garages_link (car_id, garage_id) VALUES ($1, $2);")
            .bind(car_id)
            .bind(garage_id)
            .execute(self.storage.get_pool())
            .await
            .unwrap();
    }

    pub async fn create_test_request(
        &self,
        car_id: i32,
        garage_id: i32,
        day: &str,
    ) -> MaintenanceRequest {
        sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (car_id, garage_id, service_type, scheduled_date)
                VALUES ($1, $2, 'Oil change', $3)
                RETURNING *;
            "#,
        )
        .bind(car_id)
        .bind(garage_id)
        .bind(day)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
