use crate::api::dtos::requests::BookSlotMessage;
use crate::api::dtos::responses::{AvailableSessionsResponse, WsError, WsResponse};
use crate::domain::models::catalog::Sport;
use crate::domain::services::availability;
use crate::domain::services::booking::{
    BookingRequest, IntervalBooking, SessionBooking,
};
use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Real-time booking gateway. One task per connection; messages within a
/// connection are handled sequentially, so an in-flight commit always
/// finishes before the next receive (or the disconnect) is processed.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket connection accepted.");

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(m) => m,
            Err(e) => {
                warn!("websocket receive error: {e}");
                break;
            }
        };
        match msg {
            Message::Text(text) => {
                let response = handle_message(&state, text.as_str()).await;
                let payload = match serde_json::to_string(&response) {
                    Ok(p) => p,
                    Err(e) => {
                        error!("failed to serialize websocket response: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            Message::Binary(_) => warn!("ignoring unexpected binary message"),
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => break,
        }
    }

    debug!("WebSocket connection closed.");
}

/// Dispatch one inbound frame. Always returns a structured response; a bad
/// message must never take the connection down.
async fn handle_message(state: &AppState, text: &str) -> WsResponse {
    debug!("received message: {text}");

    let data: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return WsResponse::Error(WsError::new("Invalid JSON message.", true)),
    };

    let message_type = data.get("type").and_then(Value::as_str).unwrap_or_default();
    let Some(sports) = data.get("sports").and_then(Value::as_str) else {
        return WsResponse::Error(WsError::new("Missing \"sports\" field.", true));
    };

    if message_type == "get_available_sessions" && sports == "Swimming" {
        handle_get_available_sessions(state, &data).await
    } else if message_type == "book_slot" {
        let sports = sports.to_string();
        handle_book_slot(state, &sports, data).await
    } else {
        WsResponse::Error(WsError::new(
            "Unsupported message type or missing parameters.",
            true,
        ))
    }
}

async fn handle_get_available_sessions(state: &AppState, data: &Value) -> WsResponse {
    let Some(date_raw) = data.get("date").and_then(Value::as_str) else {
        return WsResponse::Error(WsError::new("Missing \"date\" field.", false));
    };
    let Ok(date) = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d") else {
        return WsResponse::Error(WsError::new(
            "Invalid date format. Expected 'YYYY-MM-DD'.",
            false,
        ));
    };

    match availability::available_sessions(
        state.catalog_repo.as_ref(),
        state.swim_repo.as_ref(),
        date,
    )
    .await
    {
        Ok(available) => WsResponse::Sessions(AvailableSessionsResponse::new(available)),
        Err(e) => {
            error!("error fetching available sessions: {e}");
            WsResponse::Error(WsError::new("Error fetching available sessions.", false))
        }
    }
}

async fn handle_book_slot(state: &AppState, sports: &str, data: Value) -> WsResponse {
    let Ok(sport) = Sport::from_str(sports) else {
        return WsResponse::Error(WsError::new(&format!("Unsupported sport: {sports}."), true));
    };

    let msg: BookSlotMessage = match serde_json::from_value(data) {
        Ok(m) => m,
        Err(e) => {
            debug!("malformed book_slot message: {e}");
            return WsResponse::Error(WsError::new("Missing or invalid booking parameters.", true));
        }
    };

    let request = if sport.is_interval_sport() {
        let (Some(field_size_id), Some(start_time), Some(end_time)) =
            (msg.field_size_id, msg.start_time, msg.end_time)
        else {
            return WsResponse::Error(WsError::new("Missing or invalid booking parameters.", true));
        };
        BookingRequest::Interval(IntervalBooking {
            sport,
            user_id: msg.user_id,
            turf_id: msg.turf_id,
            field_size_id,
            date: msg.date,
            start_time,
            end_time,
            coupon_code: msg.coupon_code,
        })
    } else {
        let Some(session_id) = msg.session_id else {
            return WsResponse::Error(WsError::new("Missing \"session_id\" field.", true));
        };
        BookingRequest::Session(SessionBooking {
            user_id: msg.user_id,
            turf_id: msg.turf_id,
            field_size_id: msg.field_size_id,
            session_id,
            date: msg.date,
            number_of_people: coerce_people(msg.number_of_people),
        })
    };

    WsResponse::Outcome(state.booking_service.book_slot(request).await)
}

/// Headcount arrives as a number or a numeric string; absent means one
/// person. `None` marks a value the coordinator must reject as invalid.
fn coerce_people(raw: Option<Value>) -> Option<i64> {
    match raw {
        None => Some(1),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}
