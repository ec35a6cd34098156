use crate::config::Config;
use crate::domain::ports::{
    CatalogRepository, Clock, CouponRepository, SlotRepository, SwimBookingRepository,
    UserRepository,
};
use crate::domain::services::booking::BookingService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub slot_repo: Arc<dyn SlotRepository>,
    pub swim_repo: Arc<dyn SwimBookingRepository>,
    pub coupon_repo: Arc<dyn CouponRepository>,
    pub clock: Arc<dyn Clock>,
    pub booking_service: Arc<BookingService>,
}
