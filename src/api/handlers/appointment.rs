use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::shop::ShopId;
use crate::api::dtos::{
    requests::{AppointmentListQuery, BookAppointmentRequest, CancelAppointmentRequest, SlotsQuery},
    responses::{AppointmentResponse, SlotsResponse},
};
use crate::api::handlers::member::require_barber;
use crate::domain::models::service::Service;
use crate::domain::services::booking_service::BookingRequest;
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

async fn require_barber_service(state: &AppState, shop_id: &str, barber_id: &str, service_id: &str) -> Result<Service, AppError> {
    state.service_repo.find_by_id(shop_id, service_id).await?
        .filter(|s| s.barber_id == barber_id)
        .ok_or(AppError::NotFound("Service not found for this barber".into()))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let query = query.validate()?;
    require_barber(&state, &shop_id, &query.barber_id).await?;
    let service = require_barber_service(&state, &shop_id, &query.barber_id, &query.service_id).await?;

    let slots = state.booking_service.available_slots(&query.barber_id, query.day, &service).await?;

    Ok(Json(SlotsResponse {
        barber_id: query.barber_id,
        service_id: service.id,
        date: query.day.format("%Y-%m-%d").to_string(),
        slots: slots.iter().map(|t| t.format("%H:%M").to_string()).collect(),
    }))
}

pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let valid = payload.validate()?;

    require_barber(&state, &shop_id, &valid.barber_id).await?;
    let client = state.user_repo.find_by_id(&valid.client_id).await?
        .filter(|u| u.is_client())
        .ok_or(AppError::NotFound("Client not found".into()))?;
    let service = require_barber_service(&state, &shop_id, &valid.barber_id, &valid.service_id).await?;

    let created = state.booking_service.book(BookingRequest {
        shop_id,
        client_id: client.id,
        barber_id: valid.barber_id,
        service,
        day: valid.day,
        time: valid.time,
    }).await?;

    Ok((StatusCode::CREATED, Json(AppointmentResponse::from(created))))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, appointment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.appointment_repo.find_by_id(&shop_id, &appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;
    Ok(Json(AppointmentResponse::from(appointment)))
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Query(query): Query<AppointmentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = state.appointment_repo
        .list_by_shop(&shop_id, query.barber_id.as_deref(), query.client_id.as_deref())
        .await?;
    let body: Vec<AppointmentResponse> = appointments.into_iter().map(AppointmentResponse::from).collect();
    Ok(Json(body))
}

pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, appointment_id)): Path<(String, String)>,
    Json(payload): Json<CancelAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let actor_id = payload.actor_id()?;

    let appointment = state.appointment_repo.find_by_id(&shop_id, &appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;
    let actor = state.user_repo.find_by_id(&actor_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let cancelled = state.booking_service.cancel(appointment, &actor).await?;
    info!("Cancel request for {} handled, status {}", cancelled.id, cancelled.status);

    Ok(Json(AppointmentResponse::from(cancelled)))
}
