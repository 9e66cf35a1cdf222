use crate::domain::{models::service::Service, ports::ServiceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteServiceRepo {
    pool: SqlitePool,
}

impl SqliteServiceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, shop_id, barber_id, name, price_cents, duration_min, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&service.id).bind(&service.shop_id).bind(&service.barber_id).bind(&service.name)
            .bind(service.price_cents).bind(service.duration_min).bind(service.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE shop_id = ? AND id = ?")
            .bind(shop_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_shop(&self, shop_id: &str, barber_id: Option<&str>) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE shop_id = ? AND (? IS NULL OR barber_id = ?) ORDER BY name ASC"
        )
            .bind(shop_id)
            .bind(barber_id)
            .bind(barber_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET name = ?, price_cents = ?, duration_min = ? WHERE id = ? AND shop_id = ? RETURNING *"
        )
            .bind(&service.name).bind(service.price_cents).bind(service.duration_min)
            .bind(&service.id).bind(&service.shop_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, shop_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ? AND shop_id = ?").bind(id).bind(shop_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Service not found".into())); }
        Ok(())
    }
}
