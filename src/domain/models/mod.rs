pub mod catalog;
pub mod coupon;
pub mod slot;
pub mod swim;
pub mod user;
