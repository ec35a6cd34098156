use crate::domain::{
    models::catalog::{FieldSize, Turf},
    models::swim::SwimSession,
    ports::CatalogRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCatalogRepo {
    pool: SqlitePool,
}

impl SqliteCatalogRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepo {
    async fn find_turf(&self, id: i64) -> Result<Option<Turf>, AppError> {
        sqlx::query_as::<_, Turf>("SELECT * FROM turfs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_field_size(&self, id: i64) -> Result<Option<FieldSize>, AppError> {
        sqlx::query_as::<_, FieldSize>("SELECT * FROM field_sizes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_session(&self, id: i64) -> Result<Option<SwimSession>, AppError> {
        sqlx::query_as::<_, SwimSession>("SELECT * FROM swim_sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_sessions(&self) -> Result<Vec<SwimSession>, AppError> {
        sqlx::query_as::<_, SwimSession>("SELECT * FROM swim_sessions ORDER BY start_time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
