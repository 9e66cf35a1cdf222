use crate::domain::{models::availability::AvailabilityWindow, ports::AvailabilityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn create(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, AppError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "INSERT INTO availability_windows (id, barber_id, day, start_time, end_time, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&window.id).bind(&window.barber_id).bind(window.day)
            .bind(window.start_time).bind(window.end_time).bind(window.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_day(&self, barber_id: &str, day: NaiveDate) -> Result<Vec<AvailabilityWindow>, AppError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "SELECT * FROM availability_windows WHERE barber_id = ? AND day = ? ORDER BY start_time ASC"
        )
            .bind(barber_id)
            .bind(day)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_barber(&self, barber_id: &str, from: Option<NaiveDate>) -> Result<Vec<AvailabilityWindow>, AppError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "SELECT * FROM availability_windows WHERE barber_id = ? AND (? IS NULL OR day >= ?) ORDER BY day ASC, start_time ASC"
        )
            .bind(barber_id)
            .bind(from)
            .bind(from)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, barber_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availability_windows WHERE id = ? AND barber_id = ?").bind(id).bind(barber_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Availability window not found".into())); }
        Ok(())
    }
}
