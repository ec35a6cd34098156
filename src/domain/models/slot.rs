use crate::domain::models::catalog::Sport;
use crate::domain::models::coupon::Coupon;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Base rate per hour for an exclusive field reservation.
pub const HOURLY_RATE: f64 = 2000.0;

/// A confirmed time-interval reservation against a (turf, field size, sport)
/// resource. Rows with `is_available = false` count against the
/// no-overlap invariant; cancellation flips the flag back (admin flow).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TurfSlot {
    pub id: i64,
    pub user_id: i64,
    pub turf_id: i64,
    pub field_size_id: i64,
    pub sport: Sport,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub is_available: bool,
    pub price: f64,
    pub coupon_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

pub struct NewTurfSlot {
    pub user_id: i64,
    pub turf_id: i64,
    pub field_size_id: i64,
    pub sport: Sport,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price: f64,
    pub coupon_id: Option<i64>,
}

/// Price of an interval slot: hourly rate scaled by duration, then the
/// coupon discount if one applies.
pub fn calculate_price(start: NaiveTime, end: NaiveTime, coupon: Option<&Coupon>) -> f64 {
    let minutes = (end - start).num_minutes() as f64;
    let total = HOURLY_RATE * (minutes / 60.0);
    match coupon {
        Some(c) => c.apply(total),
        None => total,
    }
}
