use crate::domain::models::{
    catalog::{FieldSize, Sport, Turf},
    coupon::Coupon,
    slot::{NewTurfSlot, TurfSlot},
    swim::{NewSwimBooking, SwimBooking, SwimSession},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Injected time source so booking validation can be tested against fixed
/// instants instead of the wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}

/// Read-only reference data: venues, field sizes, swim session definitions.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_turf(&self, id: i64) -> Result<Option<Turf>, AppError>;
    async fn find_field_size(&self, id: i64) -> Result<Option<FieldSize>, AppError>;
    async fn find_session(&self, id: i64) -> Result<Option<SwimSession>, AppError>;
    async fn list_sessions(&self) -> Result<Vec<SwimSession>, AppError>;
}

#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, AppError>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Overlap check against confirmed reservations for the exact
    /// (turf, field size, sport) resource on a date. Advisory only; the
    /// authoritative check re-runs under the coordinator's lock.
    async fn has_conflict(
        &self,
        turf_id: i64,
        field_size_id: i64,
        sport: Sport,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool, AppError>;

    async fn create(&self, slot: &NewTurfSlot) -> Result<TurfSlot, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<TurfSlot>, AppError>;
}

#[async_trait]
pub trait SwimBookingRepository: Send + Sync {
    /// Total headcount already committed for (session, date).
    async fn people_booked(&self, session_id: i64, date: NaiveDate) -> Result<i64, AppError>;

    async fn create(&self, booking: &NewSwimBooking) -> Result<SwimBooking, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<SwimBooking>, AppError>;
    async fn add_people(&self, id: i64, additional: i64) -> Result<SwimBooking, AppError>;
}
