use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

/// A bookable offering of one barber, e.g. "Haircut, 30 min".
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub shop_id: String,
    pub barber_id: String,
    pub name: String,
    pub price_cents: i64,
    pub duration_min: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewServiceParams {
    pub shop_id: String,
    pub barber_id: String,
    pub name: String,
    pub price_cents: i64,
    pub duration_min: i32,
}

impl Service {
    pub fn new(params: NewServiceParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id: params.shop_id,
            barber_id: params.barber_id,
            name: params.name,
            price_cents: params.price_cents,
            duration_min: params.duration_min,
            created_at: Utc::now(),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_min as i64)
    }
}
