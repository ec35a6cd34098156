use std::str::FromStr;
use std::sync::Arc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

use crate::config::Config;
use crate::domain::ports::SystemClock;
use crate::domain::services::booking::BookingService;
use crate::infra::repositories::{
    sqlite_catalog_repo::SqliteCatalogRepo, sqlite_coupon_repo::SqliteCouponRepo,
    sqlite_slot_repo::SqliteSlotRepo, sqlite_swim_repo::SqliteSwimRepo,
    sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection...");

    let connection_options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite URL")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(connection_options)
        .await
        .expect("Failed to connect to SQLite");

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    build_state(config.clone(), pool)
}

pub fn build_state(config: Config, pool: sqlx::SqlitePool) -> AppState {
    let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
    let catalog_repo = Arc::new(SqliteCatalogRepo::new(pool.clone()));
    let slot_repo = Arc::new(SqliteSlotRepo::new(pool.clone()));
    let swim_repo = Arc::new(SqliteSwimRepo::new(pool.clone()));
    let coupon_repo = Arc::new(SqliteCouponRepo::new(pool));
    let clock = Arc::new(SystemClock);

    let booking_service = Arc::new(BookingService::new(
        user_repo.clone(),
        catalog_repo.clone(),
        slot_repo.clone(),
        swim_repo.clone(),
        coupon_repo.clone(),
        clock.clone(),
    ));

    AppState {
        config,
        user_repo,
        catalog_repo,
        slot_repo,
        swim_repo,
        coupon_repo,
        clock,
        booking_service,
    }
}
