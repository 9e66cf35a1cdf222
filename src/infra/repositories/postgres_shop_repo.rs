use crate::domain::{models::shop::Shop, ports::ShopRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresShopRepo {
    pool: PgPool,
}

impl PostgresShopRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopRepository for PostgresShopRepo {
    async fn create(&self, shop: &Shop) -> Result<Shop, AppError> {
        sqlx::query_as::<_, Shop>(
            "INSERT INTO shops (id, name, description, address, phone, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&shop.id)
            .bind(&shop.name)
            .bind(&shop.description)
            .bind(&shop.address)
            .bind(&shop.phone)
            .bind(shop.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Shop>, AppError> {
        sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Shop>, AppError> {
        sqlx::query_as::<_, Shop>("SELECT * FROM shops ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
