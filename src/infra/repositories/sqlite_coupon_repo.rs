use crate::domain::{models::coupon::Coupon, ports::CouponRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCouponRepo {
    pool: SqlitePool,
}

impl SqliteCouponRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CouponRepository for SqliteCouponRepo {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, AppError> {
        sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
