use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::mock_app::{response_json, MockApp};

#[tokio::test]
async fn test_create_maintenance_with_display_names() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Downtown Auto", "Sofia", 3).await;
    let car = app.create_test_car("Skoda", "CA2000AA").await;

    let response = app
        .request(
            Method::POST,
            "/maintenance",
            Some(json!({
                "carId": car.id,
                "garageId": garage.id,
                "serviceType": "Oil change",
                "scheduledDate": "2024-06-10"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["carName"], "Skoda");
    assert_eq!(body["garageName"], "Downtown Auto");
    assert_eq!(body["scheduledDate"], "2024-06-10");

    let id = body["id"].as_i64().unwrap();
    let response = app
        .request(Method::GET, &format!("/maintenance/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, body);
}

#[tokio::test]
async fn test_create_maintenance_validation() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Downtown Auto", "Sofia", 3).await;
    let car = app.create_test_car("Skoda", "CA2001AA").await;

    let response = app
        .request(
            Method::POST,
            "/maintenance",
            Some(json!({
                "carId": 42,
                "garageId": garage.id,
                "serviceType": "Oil change",
                "scheduledDate": "2024-06-10"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(
            Method::POST,
            "/maintenance",
            Some(json!({
                "carId": car.id,
                "garageId": 42,
                "serviceType": "Oil change",
                "scheduledDate": "2024-06-10"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(
            Method::POST,
            "/maintenance",
            Some(json!({
                "carId": car.id,
                "garageId": garage.id,
                "serviceType": "  ",
                "scheduledDate": "2024-06-10"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_capacity_enforced_on_create() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Tiny", "Sofia", 2).await;
    let car = app.create_test_car("Skoda", "CA2002AA").await;

    for _ in 0..2 {
        let response = app
            .request(
                Method::POST,
                "/maintenance",
                Some(json!({
                    "carId": car.id,
                    "garageId": garage.id,
                    "serviceType": "Oil change",
                    "scheduledDate": "2024-06-10"
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Third booking on the same day exceeds capacity 2
    let response = app
        .request(
            Method::POST,
            "/maintenance",
            Some(json!({
                "carId": car.id,
                "garageId": garage.id,
                "serviceType": "Oil change",
                "scheduledDate": "2024-06-10"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Another day is still open
    let response = app
        .request(
            Method::POST,
            "/maintenance",
            Some(json!({
                "carId": car.id,
                "garageId": garage.id,
                "serviceType": "Oil change",
                "scheduledDate": "2024-06-11"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_resave_at_full_capacity_allowed() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Tiny", "Sofia", 1).await;
    let car = app.create_test_car("Skoda", "CA2003AA").await;
    let request = app.create_test_request(car.id, garage.id, "2024-06-10").await;

    // The record under edit is excluded from its own booking count
    let response = app
        .request(
            Method::PUT,
            &format!("/maintenance/{}", request.id),
            Some(json!({ "scheduledDate": "2024-06-10" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Moving to a day that is already full is still rejected
    app.create_test_request(car.id, garage.id, "2024-06-12").await;
    let response = app
        .request(
            Method::PUT,
            &format!("/maintenance/{}", request.id),
            Some(json!({ "scheduledDate": "2024-06-12" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_partial_fields() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Downtown Auto", "Sofia", 3).await;
    let car = app.create_test_car("Skoda", "CA2004AA").await;
    let request = app.create_test_request(car.id, garage.id, "2024-06-10").await;

    let response = app
        .request(
            Method::PUT,
            &format!("/maintenance/{}", request.id),
            Some(json!({ "serviceType": "Brake check" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["serviceType"], "Brake check");
    assert_eq!(body["scheduledDate"], "2024-06-10");
    assert_eq!(body["carId"].as_i64().unwrap(), car.id as i64);

    let response = app
        .request(
            Method::PUT,
            &format!("/maintenance/{}", request.id),
            Some(json!({ "carId": 42 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_empty_result() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Downtown Auto", "Sofia", 5).await;
    let other = app.create_test_garage("Uptown Auto", "Sofia", 5).await;
    let car = app.create_test_car("Skoda", "CA2005AA").await;
    app.create_test_request(car.id, garage.id, "2024-01-10").await;
    app.create_test_request(car.id, garage.id, "2024-02-20").await;
    app.create_test_request(car.id, other.id, "2024-01-15").await;

    let response = app
        .request(
            Method::GET,
            &format!("/maintenance?garage_id={}", garage.id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .request(
            Method::GET,
            "/maintenance?start_date=2024-01-01&end_date=2024-01-31",
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .request(Method::GET, "/maintenance?start_date=junk", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(Method::GET, "/maintenance?car_id=42", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_maintenance() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Downtown Auto", "Sofia", 5).await;
    let car = app.create_test_car("Skoda", "CA2006AA").await;
    let request = app.create_test_request(car.id, garage.id, "2024-06-10").await;

    let response = app
        .request(Method::DELETE, &format!("/maintenance/{}", request.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);

    let response = app
        .request(Method::DELETE, &format!("/maintenance/{}", request.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_monthly_requests_report() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Downtown Auto", "Sofia", 5).await;
    let car = app.create_test_car("Skoda", "CA2007AA").await;
    app.create_test_request(car.id, garage.id, "2024-01-05").await;
    app.create_test_request(car.id, garage.id, "2024-01-31").await;
    app.create_test_request(car.id, garage.id, "2024-03-01").await;

    let response = app
        .request(
            Method::GET,
            &format!(
                "/maintenance/monthlyRequestsReport?garage_id={}&start_month=2024-01&end_month=2024-03",
                garage.id
            ),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let report = body.as_array().unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report[0]["yearMonth"], "2024-01");
    assert_eq!(report[0]["requests"], 2);
    assert_eq!(report[1]["requests"], 0);
    assert_eq!(report[2]["requests"], 1);
}

#[tokio::test]
async fn test_monthly_requests_report_validation() {
    let app = MockApp::new().await;
    let garage = app.create_test_garage("Downtown Auto", "Sofia", 5).await;

    let response = app
        .request(
            Method::GET,
            &format!(
                "/maintenance/monthlyRequestsReport?garage_id={}&start_month=2024-1&end_month=2024-03",
                garage.id
            ),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::GET,
            "/maintenance/monthlyRequestsReport?garage_id=42&start_month=2024-01&end_month=2024-03",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
