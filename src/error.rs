use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::services::availability::BookingRejection;

// SQLite: 2067 UNIQUE, 1555 PRIMARY KEY. Postgres: 23505 unique_violation.
const UNIQUE_VIOLATION_CODES: [&str; 3] = ["2067", "1555", "23505"];
// SQLite: 5 BUSY, 517 BUSY_SNAPSHOT. Postgres: 40001 serialization_failure, 40P01 deadlock_detected.
const RETRYABLE_CODES: [&str; 4] = ["5", "517", "40001", "40P01"];

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Booking rejected: {0}")]
    Rejected(BookingRejection),
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    if UNIQUE_VIOLATION_CODES.contains(&&*code) {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)" }))
                        ).into_response();
                    }

                    if RETRYABLE_CODES.contains(&&*code) {
                        warn!("Write contention, asking client to retry: {:?}", e);
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Schedule is busy, please retry", "retryable": true }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Rejected(rejection) => {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": rejection.to_string(), "reason": rejection.code() }))
                ).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
