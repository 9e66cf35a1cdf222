use std::sync::Arc;
use crate::domain::ports::{
    AppointmentRepository, AvailabilityRepository, NotificationRepository,
    ServiceRepository, ShopRepository, UserRepository,
};
use crate::domain::services::booking_service::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub shop_repo: Arc<dyn ShopRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub booking_service: Arc<BookingService>,
}

impl AppState {
    /// Wires the booking service over the given repositories.
    pub fn new(
        shop_repo: Arc<dyn ShopRepository>,
        user_repo: Arc<dyn UserRepository>,
        service_repo: Arc<dyn ServiceRepository>,
        availability_repo: Arc<dyn AvailabilityRepository>,
        appointment_repo: Arc<dyn AppointmentRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
    ) -> Self {
        let booking_service = Arc::new(BookingService::new(
            availability_repo.clone(),
            appointment_repo.clone(),
        ));

        Self {
            shop_repo,
            user_repo,
            service_repo,
            availability_repo,
            appointment_repo,
            notification_repo,
            booking_service,
        }
    }
}
