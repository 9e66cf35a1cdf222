use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_shop_repo::PostgresShopRepo, postgres_user_repo::PostgresUserRepo,
    postgres_service_repo::PostgresServiceRepo, postgres_availability_repo::PostgresAvailabilityRepo,
    postgres_appointment_repo::PostgresAppointmentRepo, postgres_notification_repo::PostgresNotificationRepo,
    sqlite_shop_repo::SqliteShopRepo, sqlite_user_repo::SqliteUserRepo,
    sqlite_service_repo::SqliteServiceRepo, sqlite_availability_repo::SqliteAvailabilityRepo,
    sqlite_appointment_repo::SqliteAppointmentRepo, sqlite_notification_repo::SqliteNotificationRepo,
};

pub fn is_postgres_url(database_url: &str) -> bool {
    database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if is_postgres_url(database_url) {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections.unwrap_or(10))
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        postgres_state(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections.unwrap_or(5))
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        sqlite_state(pool)
    }
}

pub fn sqlite_state(pool: SqlitePool) -> AppState {
    AppState::new(
        Arc::new(SqliteShopRepo::new(pool.clone())),
        Arc::new(SqliteUserRepo::new(pool.clone())),
        Arc::new(SqliteServiceRepo::new(pool.clone())),
        Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
        Arc::new(SqliteAppointmentRepo::new(pool.clone())),
        Arc::new(SqliteNotificationRepo::new(pool)),
    )
}

pub fn postgres_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PostgresShopRepo::new(pool.clone())),
        Arc::new(PostgresUserRepo::new(pool.clone())),
        Arc::new(PostgresServiceRepo::new(pool.clone())),
        Arc::new(PostgresAvailabilityRepo::new(pool.clone())),
        Arc::new(PostgresAppointmentRepo::new(pool.clone())),
        Arc::new(PostgresNotificationRepo::new(pool)),
    )
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
