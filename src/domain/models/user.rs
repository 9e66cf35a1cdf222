use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_BARBER: &str = "barber";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub shop_id: Option<String>,
    pub username: String,
    pub role: String,
    pub nickname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub commission_pct: f64,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, role: &str, shop_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id,
            username,
            role: role.to_string(),
            nickname: None,
            phone: None,
            email: None,
            commission_pct: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn is_barber_of(&self, shop_id: &str) -> bool {
        self.role == ROLE_BARBER && self.shop_id.as_deref() == Some(shop_id)
    }

    pub fn is_client(&self) -> bool {
        self.role == ROLE_CLIENT
    }
}
