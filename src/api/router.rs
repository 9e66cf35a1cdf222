use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, shop, member, service, availability, appointment, notification};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Shops
        .route("/api/v1/shops", post(shop::create_shop).get(shop::list_shops))
        .route("/api/v1/shops/{shop_id}", get(shop::get_shop))

        // People
        .route("/api/v1/clients", post(member::register_client))
        .route("/api/v1/{shop_id}/barbers", post(member::onboard_barber).get(member::list_barbers))
        .route("/api/v1/{shop_id}/barbers/{barber_id}", delete(member::remove_barber))

        // Services
        .route("/api/v1/{shop_id}/services", post(service::create_service).get(service::list_services))
        .route("/api/v1/{shop_id}/services/{service_id}", get(service::get_service).put(service::update_service).delete(service::delete_service))

        // Availability
        .route("/api/v1/{shop_id}/barbers/{barber_id}/availability", post(availability::create_window).get(availability::list_windows))
        .route("/api/v1/{shop_id}/barbers/{barber_id}/availability/{window_id}", delete(availability::delete_window))

        // Booking flow
        .route("/api/v1/{shop_id}/slots", get(appointment::get_slots))
        .route("/api/v1/{shop_id}/appointments", post(appointment::book_appointment).get(appointment::list_appointments))
        .route("/api/v1/{shop_id}/appointments/{appointment_id}", get(appointment::get_appointment))
        .route("/api/v1/{shop_id}/appointments/{appointment_id}/cancel", post(appointment::cancel_appointment))

        // Notifications
        .route("/api/v1/users/{user_id}/notifications", get(notification::list_unread))
        .route("/api/v1/users/{user_id}/notifications/{notification_id}/read", put(notification::mark_read))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        shop_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
