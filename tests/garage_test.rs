use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::mock_app::{response_json, MockApp};

#[tokio::test]
async fn test_garage_crud() {
    let app = MockApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/garages",
            Some(json!({
                "name": "Downtown Auto",
                "location": "12 Main St",
                "city": "Sofia",
                "capacity": 5
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let garage_id = body["id"].as_i64().unwrap();
    assert_eq!(body["capacity"], 5);

    let response = app
        .request(
            Method::PUT,
            &format!("/garages/{garage_id}"),
            Some(json!({ "capacity": 8 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["capacity"], 8);
    assert_eq!(body["name"], "Downtown Auto");

    let response = app
        .request(Method::GET, &format!("/garages/{garage_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(Method::DELETE, &format!("/garages/{garage_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);

    let response = app
        .request(Method::GET, &format!("/garages/{garage_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_garage_rejects_non_positive_capacity() {
    let app = MockApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/garages",
            Some(json!({
                "name": "Downtown Auto",
                "location": "12 Main St",
                "city": "Sofia",
                "capacity": 0
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_garages_by_city() {
    let app = MockApp::new().await;
    app.create_test_garage("First", "Sofia", 3).await;
    app.create_test_garage("Second", "Plovdiv", 3).await;

    let response = app.request(Method::GET, "/garages", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app.request(Method::GET, "/garages?city=Sofia", None).await;
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["city"], "Sofia");

    let response = app.request(Method::GET, "/garages?city=Varna", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_daily_availability_report() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("First", "Sofia", 5).await;
    let car = app.create_test_car("Skoda", "CA1000AA").await;
    app.create_test_request(car.id, garage.id, "2024-06-10").await;
    app.create_test_request(car.id, garage.id, "2024-06-10").await;

    let response = app
        .request(
            Method::GET,
            &format!(
                "/garages/dailyAvailabilityReport?garage_id={}&start_date=2024-06-10&end_date=2024-06-11",
                garage.id
            ),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let report = body.as_array().unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0]["date"], "2024-06-10");
    assert_eq!(report[0]["availableCapacity"], 3);
    assert_eq!(report[1]["availableCapacity"], 5);
}

#[tokio::test]
async fn test_daily_availability_report_validation() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("First", "Sofia", 5).await;

    let response = app
        .request(
            Method::GET,
            &format!(
                "/garages/dailyAvailabilityReport?garage_id={}&start_date=junk&end_date=2024-06-11",
                garage.id
            ),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::GET,
            "/garages/dailyAvailabilityReport?garage_id=42&start_date=2024-06-10&end_date=2024-06-11",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_garage_cascades_requests_and_links() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("First", "Sofia", 5).await;
    let car = app.create_test_car("Skoda", "CA1001AA").await;
    app.link_car_to_garage(car.id, garage.id).await;
    app.create_test_request(car.id, garage.id, "2024-06-10").await;

    let response = app
        .request(Method::DELETE, &format!("/garages/{}", garage.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/maintenance?garage_id={}", garage.id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The car survives, just without the association
    let response = app
        .request(Method::GET, &format!("/cars/{}", car.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["garages"].as_array().unwrap().is_empty());
}
