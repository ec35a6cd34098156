use axum::Router;
use chrono::NaiveTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use turf_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::build_state,
    state::AppState,
};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
        };

        let state = Arc::new(build_state(config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Serve the router on an ephemeral port; returns the websocket URL.
    #[allow(dead_code)]
    pub async fn spawn_server(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("ws://{addr}/ws/turf-slot")
    }

    pub async fn seed_user(&self, name: &str, email: &str) -> i64 {
        sqlx::query("INSERT INTO users (name, email, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(chrono::Utc::now())
            .execute(&self.pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    pub async fn seed_turf(&self, name: &str) -> i64 {
        sqlx::query("INSERT INTO turfs (name, location) VALUES (?, 'Test Lane 1')")
            .bind(name)
            .execute(&self.pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    #[allow(dead_code)]
    pub async fn seed_field_size(&self, name: &str) -> i64 {
        sqlx::query("INSERT INTO field_sizes (name, description) VALUES (?, NULL)")
            .bind(name)
            .execute(&self.pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    #[allow(dead_code)]
    pub async fn seed_session(
        &self,
        start: NaiveTime,
        end: NaiveTime,
        capacity: i64,
        price_per_person: f64,
    ) -> i64 {
        sqlx::query(
            "INSERT INTO swim_sessions (start_time, end_time, capacity, price_per_person)
             VALUES (?, ?, ?, ?)",
        )
        .bind(start)
        .bind(end)
        .bind(capacity)
        .bind(price_per_person)
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    #[allow(dead_code)]
    pub async fn seed_coupon(
        &self,
        code: &str,
        discount_percentage: Option<f64>,
        discount_amount: Option<f64>,
        is_active: bool,
    ) -> i64 {
        sqlx::query(
            "INSERT INTO coupons (name, code, discount_amount, discount_percentage, is_active)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(code)
        .bind(code)
        .bind(discount_amount)
        .bind(discount_percentage)
        .bind(is_active)
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn tomorrow() -> String {
    (chrono::Utc::now() + chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

#[allow(dead_code)]
pub fn yesterday() -> String {
    (chrono::Utc::now() - chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

#[allow(dead_code)]
pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
