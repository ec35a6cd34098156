use crate::domain::{
    models::catalog::Sport,
    models::slot::{NewTurfSlot, TurfSlot},
    ports::SlotRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteSlotRepo {
    pool: SqlitePool,
}

impl SqliteSlotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for SqliteSlotRepo {
    async fn has_conflict(
        &self,
        turf_id: i64,
        field_size_id: i64,
        sport: Sport,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM turf_slots
             WHERE turf_id = ? AND field_size_id = ? AND sport = ? AND date = ?
               AND start_time < ? AND end_time > ? AND is_available = 0",
        )
        .bind(turf_id)
        .bind(field_size_id)
        .bind(sport)
        .bind(date)
        .bind(end)
        .bind(start)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn create(&self, slot: &NewTurfSlot) -> Result<TurfSlot, AppError> {
        sqlx::query_as::<_, TurfSlot>(
            "INSERT INTO turf_slots
                 (user_id, turf_id, field_size_id, sport, date, start_time, end_time,
                  is_booked, is_available, price, coupon_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 1, 0, ?, ?, ?)
             RETURNING *",
        )
        .bind(slot.user_id)
        .bind(slot.turf_id)
        .bind(slot.field_size_id)
        .bind(slot.sport)
        .bind(slot.date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.price)
        .bind(slot.coupon_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TurfSlot>, AppError> {
        sqlx::query_as::<_, TurfSlot>("SELECT * FROM turf_slots WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
