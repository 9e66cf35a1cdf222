use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::shop::ShopId;
use crate::api::dtos::requests::{CreateServiceRequest, ServiceListQuery, UpdateServiceRequest};
use crate::api::handlers::member::require_barber;
use crate::domain::models::service::{NewServiceParams, Service};
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let valid = payload.validate()?;
    require_barber(&state, &shop_id, &valid.barber_id).await?;

    let service = Service::new(NewServiceParams {
        shop_id,
        barber_id: valid.barber_id,
        name: valid.name,
        price_cents: valid.price_cents,
        duration_min: valid.duration_min,
    });
    let created = state.service_repo.create(&service).await?;
    info!("Service created: {} ({} min)", created.id, created.duration_min);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Query(query): Query<ServiceListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.service_repo.list_by_shop(&shop_id, query.barber_id.as_deref()).await?))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, service_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.service_repo.find_by_id(&shop_id, &service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;
    Ok(Json(service))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, service_id)): Path<(String, String)>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut service = state.service_repo.find_by_id(&shop_id, &service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if let Some(name) = payload.checked_name()? { service.name = name; }
    if let Some(price) = payload.checked_price()? { service.price_cents = price; }
    if let Some(duration) = payload.checked_duration()? { service.duration_min = duration; }

    let updated = state.service_repo.update(&service).await?;
    info!("Service updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, service_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.service_repo.delete(&shop_id, &service_id).await?;
    info!("Service deleted: {}", service_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
