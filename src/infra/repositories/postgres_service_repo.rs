use crate::domain::{models::service::Service, ports::ServiceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresServiceRepo {
    pool: PgPool,
}

impl PostgresServiceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PostgresServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, shop_id, barber_id, name, price_cents, duration_min, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *"
        )
            .bind(&service.id).bind(&service.shop_id).bind(&service.barber_id).bind(&service.name)
            .bind(service.price_cents).bind(service.duration_min).bind(service.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE shop_id = $1 AND id = $2")
            .bind(shop_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_shop(&self, shop_id: &str, barber_id: Option<&str>) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE shop_id = $1 AND ($2::text IS NULL OR barber_id = $2) ORDER BY name ASC"
        )
            .bind(shop_id)
            .bind(barber_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET name = $1, price_cents = $2, duration_min = $3 WHERE id = $4 AND shop_id = $5 RETURNING *"
        )
            .bind(&service.name).bind(service.price_cents).bind(service.duration_min)
            .bind(&service.id).bind(&service.shop_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, shop_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1 AND shop_id = $2").bind(id).bind(shop_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Service not found".into())); }
        Ok(())
    }
}
