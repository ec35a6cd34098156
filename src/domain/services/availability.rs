use crate::domain::models::swim::SwimSession;
use crate::domain::ports::{CatalogRepository, SwimBookingRepository};
use crate::error::AppError;
use chrono::NaiveDate;
use tracing::error;

/// Remaining headcount for a session on a date.
///
/// A negative remainder means committed bookings already exceed the fixed
/// capacity, which the commit path is supposed to make impossible. That is a
/// server-side fault, not a client error: log it and fail the check instead
/// of clamping.
pub async fn remaining_capacity(
    swim_repo: &dyn SwimBookingRepository,
    session: &SwimSession,
    date: NaiveDate,
) -> Result<i64, AppError> {
    let booked = swim_repo.people_booked(session.id, date).await?;
    let remaining = session.capacity - booked;
    if remaining < 0 {
        error!(
            session_id = session.id,
            %date,
            booked,
            capacity = session.capacity,
            "capacity ledger negative: bookings exceed session capacity"
        );
        return Err(AppError::Consistency(format!(
            "session {} overbooked on {} ({} booked, capacity {})",
            session.id, date, booked, session.capacity
        )));
    }
    Ok(remaining)
}

pub async fn can_book(
    swim_repo: &dyn SwimBookingRepository,
    session: &SwimSession,
    date: NaiveDate,
    requested: i64,
) -> Result<bool, AppError> {
    Ok(remaining_capacity(swim_repo, session, date).await? >= requested)
}

/// All sessions that still have room on the given date, in session order.
pub async fn available_sessions(
    catalog_repo: &dyn CatalogRepository,
    swim_repo: &dyn SwimBookingRepository,
    date: NaiveDate,
) -> Result<Vec<(SwimSession, i64)>, AppError> {
    let mut available = Vec::new();
    for session in catalog_repo.list_sessions().await? {
        let remaining = remaining_capacity(swim_repo, &session, date).await?;
        if remaining > 0 {
            available.push((session, remaining));
        }
    }
    Ok(available)
}
