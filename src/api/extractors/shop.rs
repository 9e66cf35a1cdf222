use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use std::collections::HashMap;
use crate::state::AppState;
use std::sync::Arc;
use tracing::{error, Span};

/// Resolves `{shop_id}` from the path. Unknown shops answer 404 before the
/// handler runs.
pub struct ShopId(pub String);

impl FromRequestParts<Arc<AppState>> for ShopId {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let shop_id = params.get("shop_id").ok_or(StatusCode::BAD_REQUEST)?;

        match state.shop_repo.find_by_id(shop_id).await {
            Ok(Some(_)) => {
                Span::current().record("shop_id", shop_id.as_str());
                Ok(ShopId(shop_id.clone()))
            }
            Ok(None) => Err(StatusCode::NOT_FOUND),
            Err(e) => {
                error!("Shop lookup failed: {:?}", e);
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
