use crate::domain::models::catalog::Sport;
use crate::domain::models::slot::{calculate_price, NewTurfSlot};
use crate::domain::models::swim::NewSwimBooking;
use crate::domain::ports::{
    CatalogRepository, Clock, CouponRepository, SlotRepository, SwimBookingRepository,
    UserRepository,
};
use crate::domain::services::availability::{can_book, remaining_capacity};
use crate::domain::services::locks::LockManager;
use crate::error::AppError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Strongly typed booking request, resolved from the wire message at the
/// gateway boundary. Each sport kind carries exactly the fields its
/// validation path needs; date and times stay raw strings because rejecting
/// a malformed value is part of the coordinator's contract.
pub enum BookingRequest {
    Interval(IntervalBooking),
    Session(SessionBooking),
}

pub struct IntervalBooking {
    pub sport: Sport,
    pub user_id: i64,
    pub turf_id: i64,
    pub field_size_id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub coupon_code: Option<String>,
}

pub struct SessionBooking {
    pub user_id: i64,
    pub turf_id: i64,
    pub field_size_id: Option<i64>,
    pub session_id: i64,
    pub date: String,
    /// None when the wire value was not numeric; rejected in validation.
    pub number_of_people: Option<i64>,
}

/// The definitive accept/reject result of a booking attempt.
///
/// `is_booked` says whether THIS request committed; `is_available`
/// distinguishes "rejected, but the slot is still worth retrying" from
/// "rejected, this slot itself is gone".
#[derive(Debug, Serialize, Clone)]
pub struct BookingOutcome {
    pub message: String,
    pub slot_id: Option<i64>,
    #[serde(rename = "isBooked")]
    pub is_booked: bool,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
}

impl BookingOutcome {
    pub fn booked(slot_id: i64, message: &str, is_available: bool) -> Self {
        Self {
            message: message.to_string(),
            slot_id: Some(slot_id),
            is_booked: true,
            is_available,
        }
    }

    pub fn rejected(message: impl Into<String>, is_available: bool) -> Self {
        Self {
            message: message.into(),
            slot_id: None,
            is_booked: false,
            is_available,
        }
    }
}

const MSG_SLOT_TAKEN: &str =
    "The selected slot is already booked. Please choose a different time.";
const MSG_INVALID_DATE: &str = "Invalid date format. Expected 'YYYY-MM-DD'.";
const MSG_INVALID_TIME: &str = "Invalid time format. Expected 'HH:MM'.";

/// The reservation transaction coordinator.
///
/// Owns the full booking flow: request validation, conflict/capacity
/// pre-checks, and the authoritative re-check-and-insert under a per-resource
/// lock. Every failure mode, including internal ones, is converted into a
/// `BookingOutcome` here; nothing escapes to the gateway as a raw error.
pub struct BookingService {
    user_repo: Arc<dyn UserRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
    slot_repo: Arc<dyn SlotRepository>,
    swim_repo: Arc<dyn SwimBookingRepository>,
    coupon_repo: Arc<dyn CouponRepository>,
    clock: Arc<dyn Clock>,
    locks: LockManager,
}

impl BookingService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        slot_repo: Arc<dyn SlotRepository>,
        swim_repo: Arc<dyn SwimBookingRepository>,
        coupon_repo: Arc<dyn CouponRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            catalog_repo,
            slot_repo,
            swim_repo,
            coupon_repo,
            clock,
            locks: LockManager::new(),
        }
    }

    pub async fn book_slot(&self, request: BookingRequest) -> BookingOutcome {
        let result = match request {
            BookingRequest::Interval(req) => self.book_interval(req).await,
            BookingRequest::Session(req) => self.book_session(req).await,
        };
        result.unwrap_or_else(|e| internal_failure(e))
    }

    async fn book_interval(&self, req: IntervalBooking) -> Result<BookingOutcome, AppError> {
        let date = match NaiveDate::parse_from_str(&req.date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => return Ok(BookingOutcome::rejected(MSG_INVALID_DATE, true)),
        };
        let start = match NaiveTime::parse_from_str(&req.start_time, "%H:%M") {
            Ok(t) => t,
            Err(_) => return Ok(BookingOutcome::rejected(MSG_INVALID_TIME, true)),
        };
        let end = match NaiveTime::parse_from_str(&req.end_time, "%H:%M") {
            Ok(t) => t,
            Err(_) => return Ok(BookingOutcome::rejected(MSG_INVALID_TIME, true)),
        };

        if let Err(outcome) = validate_interval_times(date, start, end, self.clock.now()) {
            return Ok(outcome);
        }

        if self.catalog_repo.find_turf(req.turf_id).await?.is_none() {
            return Ok(BookingOutcome::rejected("Selected turf does not exist.", true));
        }
        if self
            .catalog_repo
            .find_field_size(req.field_size_id)
            .await?
            .is_none()
        {
            return Ok(BookingOutcome::rejected(
                "Selected field size does not exist.",
                true,
            ));
        }
        if self.user_repo.find_by_id(req.user_id).await?.is_none() {
            return Ok(BookingOutcome::rejected("User not found.", true));
        }

        let coupon = match &req.coupon_code {
            Some(code) => match self.coupon_repo.find_by_code(code).await? {
                Some(c) if c.is_active => Some(c),
                _ => {
                    return Ok(BookingOutcome::rejected(
                        "Invalid or inactive coupon code.",
                        true,
                    ))
                }
            },
            None => None,
        };

        // Fast-fail for the common case; not race-safe on its own.
        if self
            .slot_repo
            .has_conflict(req.turf_id, req.field_size_id, req.sport, date, start, end)
            .await?
        {
            return Ok(BookingOutcome::rejected(MSG_SLOT_TAKEN, false));
        }

        let key = format!(
            "slot:{}:{}:{}:{}",
            req.turf_id, req.field_size_id, req.sport, date
        );
        let _guard = self.locks.acquire(key).await;
        debug!(
            turf_id = req.turf_id,
            field_size_id = req.field_size_id,
            sport = %req.sport,
            %date,
            "acquired interval commit lock"
        );

        // Authoritative check: re-run the overlap query under the lock.
        if self
            .slot_repo
            .has_conflict(req.turf_id, req.field_size_id, req.sport, date, start, end)
            .await?
        {
            return Ok(BookingOutcome::rejected(MSG_SLOT_TAKEN, false));
        }

        let price = calculate_price(start, end, coupon.as_ref());
        let new_slot = NewTurfSlot {
            user_id: req.user_id,
            turf_id: req.turf_id,
            field_size_id: req.field_size_id,
            sport: req.sport,
            date,
            start_time: start,
            end_time: end,
            price,
            coupon_id: coupon.map(|c| c.id),
        };

        match self.slot_repo.create(&new_slot).await {
            Ok(slot) => {
                info!(slot_id = slot.id, sport = %req.sport, %date, "slot booked");
                Ok(BookingOutcome::booked(slot.id, "Slot booked successfully.", false))
            }
            // The unique constraint on (turf, field size, sport, date, start,
            // end) is the storage-layer backstop for the race window.
            Err(e) if e.is_unique_violation() => {
                warn!(sport = %req.sport, %date, "duplicate slot insert rejected by constraint");
                Ok(BookingOutcome::rejected(MSG_SLOT_TAKEN, false))
            }
            Err(e) => Err(e),
        }
    }

    async fn book_session(&self, req: SessionBooking) -> Result<BookingOutcome, AppError> {
        let people = match req.number_of_people {
            Some(n) if n > 0 => n,
            _ => {
                return Ok(BookingOutcome::rejected(
                    "Invalid number of people. Please enter a valid number.",
                    true,
                ))
            }
        };

        let session = match self.catalog_repo.find_session(req.session_id).await? {
            Some(s) => s,
            None => {
                return Ok(BookingOutcome::rejected(
                    "Selected swimming session does not exist.",
                    true,
                ))
            }
        };

        let date = match NaiveDate::parse_from_str(&req.date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => return Ok(BookingOutcome::rejected(MSG_INVALID_DATE, true)),
        };
        if date < self.clock.today() {
            return Ok(BookingOutcome::rejected(
                "Cannot book a slot in the past. Please select a future date.",
                true,
            ));
        }

        if self.catalog_repo.find_turf(req.turf_id).await?.is_none() {
            return Ok(BookingOutcome::rejected("Selected turf does not exist.", true));
        }
        if self.user_repo.find_by_id(req.user_id).await?.is_none() {
            return Ok(BookingOutcome::rejected("User not found.", true));
        }

        let remaining = remaining_capacity(self.swim_repo.as_ref(), &session, date).await?;
        if remaining < people {
            return Ok(BookingOutcome::rejected(
                format!("Only {} spots are available for this session.", remaining),
                false,
            ));
        }

        let _guard = self
            .locks
            .acquire(format!("swim:{}:{}", session.id, date))
            .await;
        debug!(session_id = session.id, %date, "acquired session commit lock");

        // Authoritative capacity check; the pre-check above was advisory.
        if !can_book(self.swim_repo.as_ref(), &session, date, people).await? {
            return Ok(BookingOutcome::rejected(
                "Cannot book. Slot capacity exceeded.",
                false,
            ));
        }

        let booking = self
            .swim_repo
            .create(&NewSwimBooking {
                user_id: req.user_id,
                turf_id: req.turf_id,
                field_size_id: req.field_size_id,
                session_id: session.id,
                date,
                number_of_people: people,
            })
            .await?;

        info!(
            booking_id = booking.id,
            session_id = session.id,
            %date,
            people,
            "swimming slot booked"
        );
        Ok(BookingOutcome::booked(
            booking.id,
            "Swimming slot booked successfully.",
            true,
        ))
    }

    /// Grow an existing swim booking. Capacity is re-checked under the same
    /// (session, date) lock the commit path uses before the increment.
    pub async fn add_people(&self, booking_id: i64, additional: i64) -> BookingOutcome {
        self.try_add_people(booking_id, additional)
            .await
            .unwrap_or_else(|e| internal_failure(e))
    }

    async fn try_add_people(
        &self,
        booking_id: i64,
        additional: i64,
    ) -> Result<BookingOutcome, AppError> {
        if additional <= 0 {
            return Ok(BookingOutcome::rejected(
                "Invalid number of people. Please enter a valid number.",
                true,
            ));
        }

        let booking = match self.swim_repo.find_by_id(booking_id).await? {
            Some(b) => b,
            None => return Ok(BookingOutcome::rejected("Booking not found.", true)),
        };
        let session = self
            .catalog_repo
            .find_session(booking.session_id)
            .await?
            .ok_or_else(|| {
                AppError::Consistency(format!(
                    "booking {} references missing session {}",
                    booking.id, booking.session_id
                ))
            })?;

        let _guard = self
            .locks
            .acquire(format!("swim:{}:{}", session.id, booking.date))
            .await;

        if !can_book(self.swim_repo.as_ref(), &session, booking.date, additional).await? {
            return Ok(BookingOutcome::rejected(
                "Cannot book. Slot capacity exceeded.",
                false,
            ));
        }

        let updated = self.swim_repo.add_people(booking.id, additional).await?;
        info!(
            booking_id = updated.id,
            people = updated.number_of_people,
            "swim booking headcount increased"
        );
        Ok(BookingOutcome::booked(
            updated.id,
            "Swimming slot updated successfully.",
            true,
        ))
    }
}

fn validate_interval_times(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    now: NaiveDateTime,
) -> Result<(), BookingOutcome> {
    if start >= end {
        return Err(BookingOutcome::rejected(
            "Start time must be earlier than end time.",
            true,
        ));
    }
    // A slot starting exactly now is already unplayable by the time it
    // commits, so "now" counts as past.
    if date.and_time(start) <= now {
        return Err(BookingOutcome::rejected(
            "Cannot book a slot in the past. Please select a future date and time.",
            true,
        ));
    }
    Ok(())
}

fn internal_failure(e: AppError) -> BookingOutcome {
    error!("booking attempt failed: {e}");
    BookingOutcome::rejected("Error booking slot. Please try again.", true)
}
