use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            message,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
