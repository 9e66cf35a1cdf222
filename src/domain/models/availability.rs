use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

use super::time_range::TimeRange;
use crate::error::AppError;

/// An open interval a barber declared for one calendar day.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityWindow {
    pub id: String,
    pub barber_id: String,
    pub day: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityWindow {
    pub fn new(barber_id: String, day: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Result<Self, AppError> {
        if start_time >= end_time {
            return Err(AppError::Validation("Availability must start before it ends".into()));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            barber_id,
            day,
            start_time,
            end_time,
            created_at: Utc::now(),
        })
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::on_day(self.day, self.start_time, self.end_time)
    }
}
