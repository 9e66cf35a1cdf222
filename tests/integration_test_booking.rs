mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

const DAY: &str = "2025-03-10";

#[tokio::test]
async fn test_book_free_slot() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.book(&fx, DAY, "09:30").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["start_time"], "2025-03-10T09:30:00");
    assert_eq!(body["end_time"], "2025-03-10T10:00:00");
    assert_eq!(body["barber_id"], fx.barber_id.as_str());
    assert_eq!(body["client_id"], fx.client_id.as_str());

    let id = body["id"].as_str().unwrap();
    let res = app.request("GET", &format!("/api/v1/{}/appointments/{}", fx.shop_id, id), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["service_id"], fx.service_id.as_str());
}

#[tokio::test]
async fn test_booking_before_opening_is_outside_availability() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.book(&fx, DAY, "08:30").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "not within declared availability");
    assert_eq!(body["reason"], "outside_availability");
}

#[tokio::test]
async fn test_booking_running_past_closing_is_outside_availability() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let long = app.create_service(&fx.shop_id, &fx.barber_id, "Progressiva", 60).await;

    let res = app.request(
        "POST",
        &format!("/api/v1/{}/appointments", fx.shop_id),
        Some(json!({
            "client_id": fx.client_id, "barber_id": fx.barber_id,
            "service_id": long, "day": DAY, "time": "11:30"
        })),
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["reason"], "outside_availability");
}

#[tokio::test]
async fn test_double_booking_is_refused() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    assert_eq!(app.book(&fx, DAY, "10:00").await.status(), StatusCode::CREATED);

    let res = app.book(&fx, DAY, "10:00").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "slot already booked");
    assert_eq!(body["reason"], "already_booked");
}

#[tokio::test]
async fn test_off_grid_start_partially_overlapping_is_refused() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    assert_eq!(app.book(&fx, DAY, "10:00").await.status(), StatusCode::CREATED);

    let res = app.book(&fx, DAY, "10:15").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["reason"], "already_booked");

    // Back-to-back with the existing booking.
    assert_eq!(app.book(&fx, DAY, "10:30").await.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_longer_service_conflicts_with_later_booking() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let long = app.create_service(&fx.shop_id, &fx.barber_id, "Corte + Barba", 60).await;

    assert_eq!(app.book(&fx, DAY, "10:30").await.status(), StatusCode::CREATED);

    let res = app.request(
        "POST",
        &format!("/api/v1/{}/appointments", fx.shop_id),
        Some(json!({
            "client_id": fx.client_id, "barber_id": fx.barber_id,
            "service_id": long, "day": DAY, "time": "10:00"
        })),
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["reason"], "already_booked");
}

#[tokio::test]
async fn test_booking_requires_every_field() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.request(
        "POST",
        &format!("/api/v1/{}/appointments", fx.shop_id),
        Some(json!({"client_id": fx.client_id, "barber_id": fx.barber_id, "day": DAY, "time": "10:00"})),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "service_id is required");

    let res = app.book(&fx, DAY, "10h00").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_needs_a_known_client() {
    let app = TestApp::new().await;
    let mut fx = app.fixture(DAY).await;

    fx.client_id = "ghost".to_string();
    assert_eq!(app.book(&fx, DAY, "10:00").await.status(), StatusCode::NOT_FOUND);

    // A barber is not a client.
    fx.client_id = app.create_barber(&fx.shop_id, "barber_as_client").await;
    assert_eq!(app.book(&fx, DAY, "10:00").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_barber_of_another_shop_cannot_be_booked_here() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let other_shop = app.create_shop("Outra").await;

    let res = app.request(
        "POST",
        &format!("/api/v1/{}/appointments", other_shop),
        Some(json!({
            "client_id": fx.client_id, "barber_id": fx.barber_id,
            "service_id": fx.service_id, "day": DAY, "time": "10:00"
        })),
    ).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_appointments_filters_and_orders() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let other_client = app.create_client("segundo_cliente").await;

    assert_eq!(app.book(&fx, DAY, "11:00").await.status(), StatusCode::CREATED);
    assert_eq!(app.book(&fx, DAY, "09:00").await.status(), StatusCode::CREATED);
    let res = app.request(
        "POST",
        &format!("/api/v1/{}/appointments", fx.shop_id),
        Some(json!({
            "client_id": other_client, "barber_id": fx.barber_id,
            "service_id": fx.service_id, "day": DAY, "time": "10:00"
        })),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let all = parse_body(app.request("GET", &format!("/api/v1/{}/appointments", fx.shop_id), None).await).await;
    let starts: Vec<&str> = all.as_array().unwrap().iter().map(|a| a["start_time"].as_str().unwrap()).collect();
    assert_eq!(starts, vec!["2025-03-10T09:00:00", "2025-03-10T10:00:00", "2025-03-10T11:00:00"]);

    let mine = parse_body(app.request(
        "GET",
        &format!("/api/v1/{}/appointments?client_id={}", fx.shop_id, fx.client_id),
        None,
    ).await).await;
    assert_eq!(mine.as_array().unwrap().len(), 2);

    let by_barber = parse_body(app.request(
        "GET",
        &format!("/api/v1/{}/appointments?barber_id={}&client_id={}", fx.shop_id, fx.barber_id, other_client),
        None,
    ).await).await;
    assert_eq!(by_barber.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleted_service_falls_back_to_default_duration() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let long = app.create_service(&fx.shop_id, &fx.barber_id, "Progressiva", 90).await;

    let res = app.request(
        "POST",
        &format!("/api/v1/{}/appointments", fx.shop_id),
        Some(json!({
            "client_id": fx.client_id, "barber_id": fx.barber_id,
            "service_id": long, "day": DAY, "time": "09:00"
        })),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.request("DELETE", &format!("/api/v1/{}/services/{}", fx.shop_id, long), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(app.request("GET", &format!("/api/v1/{}/appointments/{}", fx.shop_id, id), None).await).await;
    assert!(body["service_id"].is_null());
    assert_eq!(body["end_time"], "2025-03-10T09:30:00");

    // The freed tail of the old 90 minute booking is bookable again.
    let slots = app.slots(&fx.shop_id, &fx.barber_id, &fx.service_id, DAY).await;
    assert_eq!(slots.first().map(String::as_str), Some("09:30"));
}
