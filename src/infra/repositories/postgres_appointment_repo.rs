use crate::domain::{
    models::{
        appointment::{Appointment, DEFAULT_DURATION_MIN, STATUS_ACTIVE},
        availability::AvailabilityWindow,
        notification::Notification,
        time_range::TimeRange,
    },
    ports::AppointmentRepository,
    services::availability::{check_booking, BookingDecision, BookingLedger},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_WITH_DURATION: &str =
    "SELECT a.*, s.duration_min AS duration_min FROM appointments a LEFT JOIN services s ON s.id = a.service_id";

async fn fetch_active_overlapping<'e, E>(executor: E, barber_id: &str, range: &TimeRange) -> Result<Vec<Appointment>, AppError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Appointment>(
        "SELECT a.*, s.duration_min AS duration_min
         FROM appointments a LEFT JOIN services s ON s.id = a.service_id
         WHERE a.barber_id = $1 AND a.status = $2
           AND a.start_time < $3
           AND a.start_time + make_interval(mins => COALESCE(s.duration_min, $4)) > $5
         ORDER BY a.start_time ASC"
    )
        .bind(barber_id).bind(STATUS_ACTIVE)
        .bind(range.end).bind(DEFAULT_DURATION_MIN).bind(range.start)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepo {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let requested = appointment.range();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Serializes writers per barber until commit/rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&appointment.barber_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        let windows = sqlx::query_as::<_, AvailabilityWindow>(
            "SELECT * FROM availability_windows WHERE barber_id = $1 AND day = $2 ORDER BY start_time ASC"
        )
            .bind(&appointment.barber_id).bind(appointment.start_time.date())
            .fetch_all(&mut *tx).await.map_err(AppError::Database)?;
        let booked = fetch_active_overlapping(&mut *tx, &appointment.barber_id, &requested).await?;

        // Dropping tx rolls back and releases the lock.
        if let BookingDecision::Rejected(reason) = check_booking(&windows, &BookingLedger::from_appointments(&booked), &requested) {
            return Err(AppError::Rejected(reason));
        }

        sqlx::query(
            "INSERT INTO appointments (id, shop_id, client_id, barber_id, service_id, start_time, status, cancellation_message, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        )
            .bind(&appointment.id).bind(&appointment.shop_id).bind(&appointment.client_id).bind(&appointment.barber_id)
            .bind(&appointment.service_id).bind(appointment.start_time).bind(&appointment.status)
            .bind(&appointment.cancellation_message).bind(appointment.created_at)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(appointment.clone())
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(&format!("{SELECT_WITH_DURATION} WHERE a.shop_id = $1 AND a.id = $2"))
            .bind(shop_id).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_overlapping(&self, barber_id: &str, range: &TimeRange) -> Result<Vec<Appointment>, AppError> {
        fetch_active_overlapping(&self.pool, barber_id, range).await
    }

    async fn list_by_shop(&self, shop_id: &str, barber_id: Option<&str>, client_id: Option<&str>) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(&format!(
            "{SELECT_WITH_DURATION} WHERE a.shop_id = $1 AND ($2::text IS NULL OR a.barber_id = $2) AND ($3::text IS NULL OR a.client_id = $3) ORDER BY a.start_time ASC"
        ))
            .bind(shop_id).bind(barber_id).bind(client_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn set_status(
        &self,
        id: &str,
        status: &str,
        message: Option<&str>,
        notice: Option<&Notification>,
    ) -> Result<Option<Appointment>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("UPDATE appointments SET status = $1, cancellation_message = $2 WHERE id = $3 AND status = $4")
            .bind(status).bind(message).bind(id).bind(STATUS_ACTIVE)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Ok(None); }

        if let Some(n) = notice {
            sqlx::query("INSERT INTO notifications (id, user_id, message, is_read, created_at) VALUES ($1, $2, $3, $4, $5)")
                .bind(&n.id).bind(&n.user_id).bind(&n.message).bind(n.is_read).bind(n.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        let updated = sqlx::query_as::<_, Appointment>(&format!("{SELECT_WITH_DURATION} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }
}
