use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn list_unread(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    Ok(Json(state.notification_repo.list_unread(&user_id).await?))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path((user_id, notification_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.notification_repo.mark_read(&user_id, &notification_id).await?;
    info!("Notification {} marked read", notification_id);
    Ok(Json(serde_json::json!({"status": "read"})))
}
