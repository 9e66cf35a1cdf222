use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateShopRequest;
use crate::domain::models::shop::Shop;
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn create_shop(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateShopRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut shop = Shop::new(payload.name()?);
    shop.description = payload.description;
    shop.address = payload.address;
    shop.phone = payload.phone;

    let created = state.shop_repo.create(&shop).await?;
    info!("Shop created: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_shop(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let shop = state.shop_repo.find_by_id(&shop_id).await?
        .ok_or(AppError::NotFound("Shop not found".into()))?;
    Ok(Json(shop))
}

pub async fn list_shops(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.shop_repo.list().await?))
}
