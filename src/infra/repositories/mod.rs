pub mod sqlite_catalog_repo;
pub mod sqlite_coupon_repo;
pub mod sqlite_slot_repo;
pub mod sqlite_swim_repo;
pub mod sqlite_user_repo;
