use serde::Deserialize;
use serde_json::Value;

/// Raw `book_slot` wire message. Sport-specific requirements (interval times
/// vs session id) are enforced when this is resolved into a typed
/// `BookingRequest` at the gateway boundary.
#[derive(Debug, Deserialize)]
pub struct BookSlotMessage {
    pub sports: String,
    pub turf_id: i64,
    pub field_size_id: Option<i64>,
    pub session_id: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub date: String,
    pub user_id: i64,
    /// Kept loose on purpose: clients send numbers and numeric strings, and
    /// a bad value must become a validation outcome, not a parse failure.
    #[serde(default)]
    pub number_of_people: Option<Value>,
    pub coupon_code: Option<String>,
}
