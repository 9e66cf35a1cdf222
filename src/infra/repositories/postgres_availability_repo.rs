use crate::domain::{models::availability::AvailabilityWindow, ports::AvailabilityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresAvailabilityRepo {
    pool: PgPool,
}

impl PostgresAvailabilityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepo {
    async fn create(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, AppError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "INSERT INTO availability_windows (id, barber_id, day, start_time, end_time, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&window.id).bind(&window.barber_id).bind(window.day)
            .bind(window.start_time).bind(window.end_time).bind(window.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_day(&self, barber_id: &str, day: NaiveDate) -> Result<Vec<AvailabilityWindow>, AppError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "SELECT * FROM availability_windows WHERE barber_id = $1 AND day = $2 ORDER BY start_time ASC"
        )
            .bind(barber_id)
            .bind(day)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_barber(&self, barber_id: &str, from: Option<NaiveDate>) -> Result<Vec<AvailabilityWindow>, AppError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "SELECT * FROM availability_windows WHERE barber_id = $1 AND ($2::date IS NULL OR day >= $2) ORDER BY day ASC, start_time ASC"
        )
            .bind(barber_id)
            .bind(from)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, barber_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availability_windows WHERE id = $1 AND barber_id = $2").bind(id).bind(barber_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Availability window not found".into())); }
        Ok(())
    }
}
