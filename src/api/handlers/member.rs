use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::shop::ShopId;
use crate::api::dtos::requests::{OnboardBarberRequest, RegisterClientRequest};
use crate::domain::models::user::{User, ROLE_BARBER, ROLE_CLIENT};
use std::sync::Arc;
use crate::error::AppError;
use tracing::{info, error};

/// Loads `barber_id` and checks it is a barber of `shop_id`.
pub(crate) async fn require_barber(state: &AppState, shop_id: &str, barber_id: &str) -> Result<User, AppError> {
    state.user_repo.find_by_id(barber_id).await?
        .filter(|u| u.is_barber_of(shop_id))
        .ok_or(AppError::NotFound("Barber not found".into()))
}

async fn ensure_username_free(state: &AppState, username: &str) -> Result<(), AppError> {
    if state.user_repo.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }
    Ok(())
}

pub async fn register_client(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let valid = payload.validate()?;
    ensure_username_free(&state, &valid.username).await?;

    let mut user = User::new(valid.username, ROLE_CLIENT, None);
    user.phone = Some(valid.phone);
    user.nickname = payload.nickname;
    user.email = payload.email;

    let created = state.user_repo.create(&user).await?;
    info!("Registered client: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn onboard_barber(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Json(payload): Json<OnboardBarberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username()?;
    let commission_pct = payload.commission_pct()?;
    ensure_username_free(&state, &username).await?;

    let mut user = User::new(username, ROLE_BARBER, Some(shop_id.clone()));
    user.nickname = payload.nickname;
    user.phone = payload.phone;
    user.email = payload.email;
    user.commission_pct = commission_pct;

    let created = state.user_repo.create(&user).await?;
    info!("Onboarded barber {} into shop {}", created.id, shop_id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_barbers(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.user_repo.list_by_shop_and_role(&shop_id, ROLE_BARBER).await?))
}

pub async fn remove_barber(
    State(state): State<Arc<AppState>>,
    ShopId(shop_id): ShopId,
    Path((_, barber_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    match state.user_repo.remove_from_shop(&shop_id, &barber_id).await {
        Ok(_) => {
            info!("Removed barber {} from shop {}", barber_id, shop_id);
            Ok(Json(serde_json::json!({"status": "removed"})))
        },
        Err(e) => {
            error!("Failed to remove barber {}: {:?}", barber_id, e);
            Err(e)
        }
    }
}
