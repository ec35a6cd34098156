use crate::domain::models::swim::SwimSession;
use crate::domain::services::booking::BookingOutcome;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub session_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub remaining_capacity: i64,
    pub price_per_person: f64,
}

#[derive(Debug, Serialize)]
pub struct AvailableSessionsResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub sessions: Vec<SessionInfo>,
}

impl AvailableSessionsResponse {
    pub fn new(available: Vec<(SwimSession, i64)>) -> Self {
        let sessions = available
            .into_iter()
            .map(|(session, remaining)| SessionInfo {
                session_id: session.id,
                start_time: session.start_time.format("%H:%M").to_string(),
                end_time: session.end_time.format("%H:%M").to_string(),
                remaining_capacity: remaining,
                price_per_person: session.price_per_person,
            })
            .collect();
        Self {
            kind: "available_sessions",
            sessions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WsError {
    pub message: String,
    #[serde(rename = "isBooked")]
    pub is_booked: bool,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
}

impl WsError {
    pub fn new(message: &str, is_available: bool) -> Self {
        Self {
            message: format!("Error: {message}"),
            is_booked: false,
            is_available,
        }
    }
}

/// Everything the gateway can emit for one inbound message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WsResponse {
    Sessions(AvailableSessionsResponse),
    Outcome(BookingOutcome),
    Error(WsError),
}
