use crate::domain::{
    models::swim::{NewSwimBooking, SwimBooking},
    ports::SwimBookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteSwimRepo {
    pool: SqlitePool,
}

impl SqliteSwimRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwimBookingRepository for SqliteSwimRepo {
    async fn people_booked(&self, session_id: i64, date: NaiveDate) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(number_of_people), 0) as total
             FROM swim_bookings WHERE session_id = ? AND date = ?",
        )
        .bind(session_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("total"))
    }

    async fn create(&self, booking: &NewSwimBooking) -> Result<SwimBooking, AppError> {
        sqlx::query_as::<_, SwimBooking>(
            "INSERT INTO swim_bookings
                 (user_id, turf_id, field_size_id, session_id, date, number_of_people, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(booking.user_id)
        .bind(booking.turf_id)
        .bind(booking.field_size_id)
        .bind(booking.session_id)
        .bind(booking.date)
        .bind(booking.number_of_people)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SwimBooking>, AppError> {
        sqlx::query_as::<_, SwimBooking>("SELECT * FROM swim_bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn add_people(&self, id: i64, additional: i64) -> Result<SwimBooking, AppError> {
        sqlx::query_as::<_, SwimBooking>(
            "UPDATE swim_bookings SET number_of_people = number_of_people + ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(additional)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }
}
