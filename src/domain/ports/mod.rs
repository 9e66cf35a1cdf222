use crate::domain::models::{
    shop::Shop, user::User, service::Service, availability::AvailabilityWindow,
    appointment::Appointment, notification::Notification, time_range::TimeRange,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn create(&self, shop: &Shop) -> Result<Shop, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Shop>, AppError>;
    async fn list(&self) -> Result<Vec<Shop>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn list_by_shop_and_role(&self, shop_id: &str, role: &str) -> Result<Vec<User>, AppError>;
    /// Detaches a barber from the shop and drops their services there.
    /// The user row and its appointment history are kept.
    async fn remove_from_shop(&self, shop_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Service>, AppError>;
    async fn list_by_shop(&self, shop_id: &str, barber_id: Option<&str>) -> Result<Vec<Service>, AppError>;
    async fn update(&self, service: &Service) -> Result<Service, AppError>;
    async fn delete(&self, shop_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn create(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, AppError>;
    /// Windows of `barber_id` on `day`, ordered by start time.
    async fn list_for_day(&self, barber_id: &str, day: NaiveDate) -> Result<Vec<AvailabilityWindow>, AppError>;
    async fn list_by_barber(&self, barber_id: &str, from: Option<NaiveDate>) -> Result<Vec<AvailabilityWindow>, AppError>;
    async fn delete(&self, barber_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Inserts under an exclusive per-barber write boundary, re-checking
    /// availability and active bookings inside it. Fails with
    /// `AppError::Rejected` when the slot was lost in the meantime.
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Appointment>, AppError>;
    /// Active appointments of `barber_id` overlapping `range`.
    async fn list_active_overlapping(&self, barber_id: &str, range: &TimeRange) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_shop(&self, shop_id: &str, barber_id: Option<&str>, client_id: Option<&str>) -> Result<Vec<Appointment>, AppError>;
    /// Only `active` rows are updated; returns `None` if the appointment was not active.
    /// `notice` is stored in the same transaction as the status change, so
    /// neither write survives without the other.
    async fn set_status(
        &self,
        id: &str,
        status: &str,
        message: Option<&str>,
        notice: Option<&Notification>,
    ) -> Result<Option<Appointment>, AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list_unread(&self, user_id: &str) -> Result<Vec<Notification>, AppError>;
    async fn mark_read(&self, user_id: &str, id: &str) -> Result<(), AppError>;
}
