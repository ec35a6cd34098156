use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Discount reference data. A coupon carries either a percentage or a flat
/// amount; percentage wins when both are present.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Coupon {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub discount_amount: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub is_active: bool,
}

impl Coupon {
    pub fn apply(&self, total: f64) -> f64 {
        if let Some(pct) = self.discount_percentage {
            total - total * (pct / 100.0)
        } else if let Some(amount) = self.discount_amount {
            (total - amount).max(0.0)
        } else {
            total
        }
    }
}
