use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::shop::ShopId;
use crate::api::dtos::requests::{parse_day, AvailabilityQuery, CreateAvailabilityRequest};
use crate::api::handlers::member::require_barber;
use crate::domain::models::availability::AvailabilityWindow;
use crate::domain::services::availability::find_overlapping_window;
use std::sync::Arc;
use crate::error::AppError;
use tracing::{info, warn};

pub async fn create_window(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, barber_id)): Path<(String, String)>,
    Json(payload): Json<CreateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_barber(&state, &shop_id, &barber_id).await?;

    let (day, start, end) = payload.validate()?;
    let window = AvailabilityWindow::new(barber_id.clone(), day, start, end)?;

    let existing = state.availability_repo.list_for_day(&barber_id, day).await?;
    if let Some(clash) = find_overlapping_window(&existing, &window) {
        warn!(barber_id = %barber_id, day = %day, "Availability overlaps window {}", clash.id);
        return Err(AppError::Conflict(format!(
            "Availability overlaps an existing window ({}-{})",
            clash.start_time.format("%H:%M"),
            clash.end_time.format("%H:%M")
        )));
    }

    let created = state.availability_repo.create(&window).await?;
    info!("Availability declared: {} for barber {} on {}", created.id, barber_id, day);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_windows(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, barber_id)): Path<(String, String)>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_barber(&state, &shop_id, &barber_id).await?;

    let from = query.from.as_deref().map(parse_day).transpose()?;
    Ok(Json(state.availability_repo.list_by_barber(&barber_id, from).await?))
}

pub async fn delete_window(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, barber_id, window_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    require_barber(&state, &shop_id, &barber_id).await?;

    state.availability_repo.delete(&barber_id, &window_id).await?;
    info!("Availability window deleted: {}", window_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
