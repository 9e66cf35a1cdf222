use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub log_dir: String,
    pub db_max_connections: Option<u32>, // falls back per backend when unset
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a number")),
        }
    }
}
