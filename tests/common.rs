use barbershop_backend::{
    api::router::create_router,
    state::AppState,
    infra::factory::sqlite_state,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
pub struct Fixture {
    pub shop_id: String,
    pub barber_id: String,
    pub client_id: String,
    pub service_id: String,
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_busy_timeout(Duration::from_secs(10)).await
    }

    /// Same as `new`, but writers give up on a held lock after `busy_timeout`.
    pub async fn with_busy_timeout(busy_timeout: Duration) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let state = Arc::new(sqlite_state(pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn create(&self, uri: &str, payload: Value) -> Value {
        let res = self.request("POST", uri, Some(payload)).await;
        assert_eq!(res.status(), StatusCode::CREATED, "POST {} failed", uri);
        parse_body(res).await
    }

    pub async fn create_shop(&self, name: &str) -> String {
        let body = self.create("/api/v1/shops", json!({"name": name})).await;
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_barber(&self, shop_id: &str, username: &str) -> String {
        let body = self.create(&format!("/api/v1/{}/barbers", shop_id), json!({"username": username})).await;
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_client(&self, username: &str) -> String {
        let body = self.create("/api/v1/clients", json!({"username": username, "phone": "+55 11 99999-0000"})).await;
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_service(&self, shop_id: &str, barber_id: &str, name: &str, duration_min: i32) -> String {
        let body = self.create(
            &format!("/api/v1/{}/services", shop_id),
            json!({"barber_id": barber_id, "name": name, "price_cents": 3000, "duration_min": duration_min}),
        ).await;
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn declare_window(&self, shop_id: &str, barber_id: &str, day: &str, start: &str, end: &str) -> Response {
        self.request(
            "POST",
            &format!("/api/v1/{}/barbers/{}/availability", shop_id, barber_id),
            Some(json!({"day": day, "start_time": start, "end_time": end})),
        ).await
    }

    pub async fn slots(&self, shop_id: &str, barber_id: &str, service_id: &str, day: &str) -> Vec<String> {
        let res = self.request(
            "GET",
            &format!("/api/v1/{}/slots?barber_id={}&service_id={}&day={}", shop_id, barber_id, service_id, day),
            None,
        ).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = parse_body(res).await;
        body["slots"].as_array().unwrap().iter().map(|s| s.as_str().unwrap().to_string()).collect()
    }

    pub async fn book(&self, fx: &Fixture, day: &str, time: &str) -> Response {
        self.request(
            "POST",
            &format!("/api/v1/{}/appointments", fx.shop_id),
            Some(json!({
                "client_id": fx.client_id, "barber_id": fx.barber_id,
                "service_id": fx.service_id, "day": day, "time": time
            })),
        ).await
    }

    /// One shop, one barber open 09:00-12:00 on `day`, one client, one 30-minute service.
    pub async fn fixture(&self, day: &str) -> Fixture {
        let shop_id = self.create_shop("Navalha").await;
        let barber_id = self.create_barber(&shop_id, &format!("barber_{}", Uuid::new_v4())).await;
        let client_id = self.create_client(&format!("client_{}", Uuid::new_v4())).await;
        let service_id = self.create_service(&shop_id, &barber_id, "Corte", 30).await;

        let res = self.declare_window(&shop_id, &barber_id, day, "09:00", "12:00").await;
        assert_eq!(res.status(), StatusCode::CREATED);

        Fixture { shop_id, barber_id, client_id, service_id }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
