use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use sqlx::FromRow;

use super::time_range::TimeRange;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Length assumed when the booked service is gone or never had a duration.
pub const DEFAULT_DURATION_MIN: i32 = 30;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: String,
    pub shop_id: String,
    pub client_id: String,
    pub barber_id: String,
    pub service_id: Option<String>,
    pub start_time: NaiveDateTime,
    pub status: String,
    pub cancellation_message: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Joined from `services`; `None` once the service has been deleted.
    #[sqlx(default)]
    pub duration_min: Option<i32>,
}

pub struct NewAppointmentParams {
    pub shop_id: String,
    pub client_id: String,
    pub barber_id: String,
    pub service_id: Option<String>,
    pub start: NaiveDateTime,
    pub duration_min: Option<i32>,
}

impl Appointment {
    pub fn new(params: NewAppointmentParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id: params.shop_id,
            client_id: params.client_id,
            barber_id: params.barber_id,
            service_id: params.service_id,
            start_time: params.start,
            status: STATUS_ACTIVE.to_string(),
            cancellation_message: None,
            created_at: Utc::now(),
            duration_min: params.duration_min,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    pub fn duration(&self) -> Duration {
        effective_duration(self.duration_min)
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + self.duration()
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::starting_at(self.start_time, self.duration())
    }
}

pub fn effective_duration(duration_min: Option<i32>) -> Duration {
    match duration_min {
        Some(min) if min > 0 => Duration::minutes(min as i64),
        _ => Duration::minutes(DEFAULT_DURATION_MIN as i64),
    }
}
