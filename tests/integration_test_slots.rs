mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

const DAY: &str = "2025-03-10";

#[tokio::test]
async fn test_open_morning_lists_every_half_hour() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let slots = app.slots(&fx.shop_id, &fx.barber_id, &fx.service_id, DAY).await;
    assert_eq!(slots, vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]);
}

#[tokio::test]
async fn test_booked_slot_is_omitted() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.book(&fx, DAY, "10:00").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let slots = app.slots(&fx.shop_id, &fx.barber_id, &fx.service_id, DAY).await;
    assert_eq!(slots, vec!["09:00", "09:30", "10:30", "11:00", "11:30"]);
}

#[tokio::test]
async fn test_longer_service_steps_by_half_hour_and_fits_window() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let long = app.create_service(&fx.shop_id, &fx.barber_id, "Corte + Barba", 60).await;

    let slots = app.slots(&fx.shop_id, &fx.barber_id, &long, DAY).await;
    assert_eq!(slots, vec!["09:00", "09:30", "10:00", "10:30", "11:00"]);

    // A 30 minute booking at 10:00 blocks 60 minute starts at 09:30 and 10:00.
    assert_eq!(app.book(&fx, DAY, "10:00").await.status(), StatusCode::CREATED);
    let slots = app.slots(&fx.shop_id, &fx.barber_id, &long, DAY).await;
    assert_eq!(slots, vec!["09:00", "10:30", "11:00"]);
}

#[tokio::test]
async fn test_day_without_windows_has_no_slots() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let slots = app.slots(&fx.shop_id, &fx.barber_id, &fx.service_id, "2025-03-11").await;
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_window_shorter_than_service_yields_nothing() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let res = app.declare_window(&fx.shop_id, &fx.barber_id, "2025-03-12", "14:00", "14:45").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let long = app.create_service(&fx.shop_id, &fx.barber_id, "Luzes", 60).await;

    assert!(app.slots(&fx.shop_id, &fx.barber_id, &long, "2025-03-12").await.is_empty());
    assert_eq!(app.slots(&fx.shop_id, &fx.barber_id, &fx.service_id, "2025-03-12").await, vec!["14:00"]);
}

#[tokio::test]
async fn test_split_day_keeps_window_order() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let res = app.declare_window(&fx.shop_id, &fx.barber_id, DAY, "14:00", "15:00").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let slots = app.slots(&fx.shop_id, &fx.barber_id, &fx.service_id, DAY).await;
    assert_eq!(slots.len(), 8);
    assert_eq!(&slots[6..], &["14:00".to_string(), "14:30".to_string()]);
}

#[tokio::test]
async fn test_slot_query_requires_all_parameters() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.request("GET", &format!("/api/v1/{}/slots?barber_id={}&day={}", fx.shop_id, fx.barber_id, DAY), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "service_id is required");

    let res = app.request(
        "GET",
        &format!("/api/v1/{}/slots?barber_id={}&service_id={}&day=10-03-2025", fx.shop_id, fx.barber_id, fx.service_id),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slots_for_unknown_barber_or_shop_are_not_found() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.request("GET", &format!("/api/v1/{}/slots?barber_id=nobody&service_id={}&day={}", fx.shop_id, fx.service_id, DAY), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.request("GET", &format!("/api/v1/no-such-shop/slots?barber_id={}&service_id={}&day={}", fx.barber_id, fx.service_id, DAY), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_service_of_another_barber_is_rejected() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    let other = app.create_barber(&fx.shop_id, "other_barber").await;
    let other_service = app.create_service(&fx.shop_id, &other, "Corte", 30).await;

    let res = app.request(
        "GET",
        &format!("/api/v1/{}/slots?barber_id={}&service_id={}&day={}", fx.shop_id, fx.barber_id, other_service, DAY),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlapping_window_is_refused() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.declare_window(&fx.shop_id, &fx.barber_id, DAY, "11:30", "13:00").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Availability overlaps an existing window (09:00-12:00)");

    // Touching the end of the existing window is fine.
    let res = app.declare_window(&fx.shop_id, &fx.barber_id, DAY, "12:00", "13:00").await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_inverted_window_is_invalid() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;

    let res = app.declare_window(&fx.shop_id, &fx.barber_id, DAY, "15:00", "14:00").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res = app.declare_window(&fx.shop_id, &fx.barber_id, DAY, "15:00", "15:00").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_delete_windows() {
    let app = TestApp::new().await;
    let fx = app.fixture(DAY).await;
    app.declare_window(&fx.shop_id, &fx.barber_id, "2025-03-09", "09:00", "10:00").await;
    app.declare_window(&fx.shop_id, &fx.barber_id, "2025-03-11", "13:00", "14:00").await;

    let base = format!("/api/v1/{}/barbers/{}/availability", fx.shop_id, fx.barber_id);
    let all = parse_body(app.request("GET", &base, None).await).await;
    let days: Vec<&str> = all.as_array().unwrap().iter().map(|w| w["day"].as_str().unwrap()).collect();
    assert_eq!(days, vec!["2025-03-09", "2025-03-10", "2025-03-11"]);

    let upcoming = parse_body(app.request("GET", &format!("{}?from={}", base, DAY), None).await).await;
    assert_eq!(upcoming.as_array().unwrap().len(), 2);

    let window_id = upcoming[0]["id"].as_str().unwrap().to_string();
    let res = app.request("DELETE", &format!("{}/{}", base, window_id), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(app.slots(&fx.shop_id, &fx.barber_id, &fx.service_id, DAY).await.is_empty());

    let res = app.request("DELETE", &format!("{}/{}", base, window_id), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.request("POST", &base, Some(json!({"day": DAY, "start_time": "09:00"}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
