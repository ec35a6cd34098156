use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recurring swim session: fixed time window, fixed headcount capacity,
/// priced per person. Static reference data.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SwimSession {
    pub id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i64,
    pub price_per_person: f64,
}

impl SwimSession {
    /// End must come after start. The one sanctioned exception is a late
    /// session that runs up to exactly midnight (23:xx -> 00:00).
    pub fn validate(&self) -> Result<(), AppError> {
        if self.end_time <= self.start_time {
            let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
            if !(self.start_time.hour() == 23 && self.end_time == midnight) {
                return Err(AppError::Validation(
                    "End time must be after start time.".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// People booked into a swim session on a date. The per-(session, date)
/// headcount across all rows is capped by the session capacity.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SwimBooking {
    pub id: i64,
    pub user_id: i64,
    pub turf_id: i64,
    pub field_size_id: Option<i64>,
    pub session_id: i64,
    pub date: NaiveDate,
    pub number_of_people: i64,
    pub created_at: DateTime<Utc>,
}

impl SwimBooking {
    pub fn total_price(&self, session: &SwimSession) -> f64 {
        self.number_of_people as f64 * session.price_per_person
    }
}

pub struct NewSwimBooking {
    pub user_id: i64,
    pub turf_id: i64,
    pub field_size_id: Option<i64>,
    pub session_id: i64,
    pub date: NaiveDate,
    pub number_of_people: i64,
}
