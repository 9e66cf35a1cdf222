use crate::domain::{models::user::{User, ROLE_BARBER}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, shop_id, username, role, nickname, phone, email, commission_pct, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&user.id).bind(&user.shop_id).bind(&user.username).bind(&user.role)
            .bind(&user.nickname).bind(&user.phone).bind(&user.email).bind(user.commission_pct)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_shop_and_role(&self, shop_id: &str, role: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE shop_id = $1 AND role = $2 ORDER BY username ASC")
            .bind(shop_id)
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn remove_from_shop(&self, shop_id: &str, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let result = sqlx::query("UPDATE users SET shop_id = NULL WHERE id = $1 AND shop_id = $2 AND role = $3")
            .bind(id).bind(shop_id).bind(ROLE_BARBER)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Barber not found".into())); }

        sqlx::query("DELETE FROM services WHERE barber_id = $1 AND shop_id = $2").bind(id).bind(shop_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        sqlx::query("DELETE FROM availability_windows WHERE barber_id = $1").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
