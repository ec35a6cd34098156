mod common;

use common::{tomorrow, yesterday, TestApp};
use turf_backend::domain::models::catalog::Sport;
use turf_backend::domain::services::booking::{BookingRequest, IntervalBooking};

#[derive(Clone, Copy)]
struct Setup {
    user_id: i64,
    turf_id: i64,
    field_size_id: i64,
}

async fn setup(app: &TestApp) -> Setup {
    Setup {
        user_id: app.seed_user("Alice", "alice@example.com").await,
        turf_id: app.seed_turf("Greenfield Arena").await,
        field_size_id: app.seed_field_size("5-a-side").await,
    }
}

fn interval(
    s: &Setup,
    sport: Sport,
    date: &str,
    start: &str,
    end: &str,
) -> BookingRequest {
    BookingRequest::Interval(IntervalBooking {
        sport,
        user_id: s.user_id,
        turf_id: s.turf_id,
        field_size_id: s.field_size_id,
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        coupon_code: None,
    })
}

#[tokio::test]
async fn books_a_free_interval_slot() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    let date = tomorrow();

    let outcome = app
        .state
        .booking_service
        .book_slot(interval(&s, Sport::Cricket, &date, "10:00", "11:00"))
        .await;

    assert!(outcome.is_booked, "unexpected outcome: {:?}", outcome);
    assert_eq!(outcome.message, "Slot booked successfully.");
    assert!(!outcome.is_available);

    let slot = app
        .state
        .slot_repo
        .find_by_id(outcome.slot_id.unwrap())
        .await
        .unwrap()
        .expect("slot row missing");
    assert_eq!(slot.user_id, s.user_id);
    assert_eq!(slot.sport, Sport::Cricket);
    assert!(slot.is_booked);
    assert!(!slot.is_available);
    assert_eq!(slot.price, 2000.0);
}

#[tokio::test]
async fn rejects_overlapping_slot_for_same_resource() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    let date = tomorrow();
    let service = &app.state.booking_service;

    let first = service
        .book_slot(interval(&s, Sport::Football, &date, "10:00", "11:00"))
        .await;
    assert!(first.is_booked);

    // Overlapping window on the same (turf, field size, sport, date).
    let second = service
        .book_slot(interval(&s, Sport::Football, &date, "10:30", "11:30"))
        .await;
    assert!(!second.is_booked);
    assert!(!second.is_available);
    assert_eq!(
        second.message,
        "The selected slot is already booked. Please choose a different time."
    );

    // Back-to-back is not an overlap.
    let adjacent = service
        .book_slot(interval(&s, Sport::Football, &date, "11:00", "12:00"))
        .await;
    assert!(adjacent.is_booked);
}

#[tokio::test]
async fn different_sport_is_a_different_resource() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    let date = tomorrow();
    let service = &app.state.booking_service;

    let cricket = service
        .book_slot(interval(&s, Sport::Cricket, &date, "10:00", "11:00"))
        .await;
    let badminton = service
        .book_slot(interval(&s, Sport::Badminton, &date, "10:00", "11:00"))
        .await;

    assert!(cricket.is_booked);
    assert!(badminton.is_booked);
}

#[tokio::test]
async fn rejects_start_not_before_end() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    let date = tomorrow();

    for (start, end) in [("11:00", "10:00"), ("10:00", "10:00")] {
        let outcome = app
            .state
            .booking_service
            .book_slot(interval(&s, Sport::Cricket, &date, start, end))
            .await;
        assert!(!outcome.is_booked);
        assert!(outcome.is_available);
        assert_eq!(outcome.message, "Start time must be earlier than end time.");
    }
}

#[tokio::test]
async fn rejects_slot_in_the_past() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    let outcome = app
        .state
        .booking_service
        .book_slot(interval(&s, Sport::Cricket, &yesterday(), "10:00", "11:00"))
        .await;
    assert!(!outcome.is_booked);
    assert!(outcome.is_available);
    assert_eq!(
        outcome.message,
        "Cannot book a slot in the past. Please select a future date and time."
    );
}

#[tokio::test]
async fn rejects_malformed_date_and_time() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    let bad_date = app
        .state
        .booking_service
        .book_slot(interval(&s, Sport::Cricket, "01-06-2030", "10:00", "11:00"))
        .await;
    assert_eq!(bad_date.message, "Invalid date format. Expected 'YYYY-MM-DD'.");

    let bad_time = app
        .state
        .booking_service
        .book_slot(interval(&s, Sport::Cricket, &tomorrow(), "10am", "11:00"))
        .await;
    assert_eq!(bad_time.message, "Invalid time format. Expected 'HH:MM'.");
}

#[tokio::test]
async fn rejects_unknown_turf_and_user() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    let date = tomorrow();

    let missing_turf = Setup { turf_id: 9999, ..s };
    let outcome = app
        .state
        .booking_service
        .book_slot(interval(&missing_turf, Sport::Cricket, &date, "10:00", "11:00"))
        .await;
    assert_eq!(outcome.message, "Selected turf does not exist.");

    let missing_user = Setup { user_id: 9999, ..s };
    let outcome = app
        .state
        .booking_service
        .book_slot(interval(&missing_user, Sport::Cricket, &date, "10:00", "11:00"))
        .await;
    assert_eq!(outcome.message, "User not found.");
}

#[tokio::test]
async fn applies_coupon_to_slot_price() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    app.seed_coupon("LAUNCH10", Some(10.0), None, true).await;
    let date = tomorrow();

    let outcome = app
        .state
        .booking_service
        .book_slot(BookingRequest::Interval(IntervalBooking {
            sport: Sport::Cricket,
            user_id: s.user_id,
            turf_id: s.turf_id,
            field_size_id: s.field_size_id,
            date: date.clone(),
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            coupon_code: Some("LAUNCH10".to_string()),
        }))
        .await;
    assert!(outcome.is_booked);

    let slot = app
        .state
        .slot_repo
        .find_by_id(outcome.slot_id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(slot.price, 1800.0);
    assert!(slot.coupon_id.is_some());
}

#[tokio::test]
async fn rejects_inactive_coupon() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    app.seed_coupon("EXPIRED", Some(10.0), None, false).await;

    let outcome = app
        .state
        .booking_service
        .book_slot(BookingRequest::Interval(IntervalBooking {
            sport: Sport::Cricket,
            user_id: s.user_id,
            turf_id: s.turf_id,
            field_size_id: s.field_size_id,
            date: tomorrow(),
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            coupon_code: Some("EXPIRED".to_string()),
        }))
        .await;
    assert!(!outcome.is_booked);
    assert_eq!(outcome.message, "Invalid or inactive coupon code.");
}

#[tokio::test]
async fn concurrent_requests_for_same_slot_yield_one_booking() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    let date = tomorrow();
    let service = app.state.booking_service.clone();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        let req = interval(&s, Sport::Cricket, &date, "18:00", "19:00");
        handles.push(tokio::spawn(async move { service.book_slot(req).await }));
    }

    let mut booked = 0;
    for handle in handles {
        let outcome = handle.await.unwrap();
        if outcome.is_booked {
            booked += 1;
        } else {
            assert!(!outcome.is_available);
        }
    }
    assert_eq!(booked, 1, "exactly one contender must win the slot");
}
