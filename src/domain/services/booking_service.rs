use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::domain::{
    models::{
        appointment::{effective_duration, Appointment, NewAppointmentParams, STATUS_CANCELLED},
        availability::AvailabilityWindow,
        notification::Notification,
        service::Service,
        time_range::TimeRange,
        user::User,
    },
    ports::{AppointmentRepository, AvailabilityRepository},
    services::availability::{check_booking, free_slots, BookingDecision, BookingLedger},
};
use crate::error::AppError;

/// A booking whose references have already been resolved and checked.
pub struct BookingRequest {
    pub shop_id: String,
    pub client_id: String,
    pub barber_id: String,
    pub service: Service,
    pub day: NaiveDate,
    pub time: NaiveTime,
}

pub struct BookingService {
    availability_repo: Arc<dyn AvailabilityRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl BookingService {
    pub fn new(
        availability_repo: Arc<dyn AvailabilityRepository>,
        appointment_repo: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self { availability_repo, appointment_repo }
    }

    /// Free start times for `service` on `day`, recomputed on every call.
    pub async fn available_slots(&self, barber_id: &str, day: NaiveDate, service: &Service) -> Result<Vec<NaiveTime>, AppError> {
        let (windows, ledger) = self.load_schedule(barber_id, day, &TimeRange::whole_day(day)).await?;
        Ok(free_slots(&windows, &ledger, service.duration()).collect())
    }

    /// Read-only decision. `book` runs it again at write time.
    pub async fn validate_booking(
        &self,
        barber_id: &str,
        day: NaiveDate,
        start_time: NaiveTime,
        service: Option<&Service>,
    ) -> Result<BookingDecision, AppError> {
        let duration = effective_duration(service.map(|s| s.duration_min));
        let requested = TimeRange::starting_at(day.and_time(start_time), duration);

        let (windows, ledger) = self.load_schedule(barber_id, day, &requested).await?;
        Ok(check_booking(&windows, &ledger, &requested))
    }

    pub async fn book(&self, request: BookingRequest) -> Result<Appointment, AppError> {
        let decision = self.validate_booking(&request.barber_id, request.day, request.time, Some(&request.service)).await?;

        if let BookingDecision::Rejected(reason) = decision {
            warn!(
                barber_id = %request.barber_id,
                day = %request.day,
                time = %request.time.format("%H:%M"),
                "Booking rejected: {}", reason
            );
            return Err(AppError::Rejected(reason));
        }

        let appointment = Appointment::new(NewAppointmentParams {
            shop_id: request.shop_id,
            client_id: request.client_id,
            barber_id: request.barber_id,
            service_id: Some(request.service.id.clone()),
            start: request.day.and_time(request.time),
            duration_min: Some(request.service.duration_min),
        });

        let created = self.appointment_repo.create(&appointment).await?;
        info!("Appointment booked: {} with barber {} at {}", created.id, created.barber_id, created.start_time);
        Ok(created)
    }

    /// Only the client or the barber of the appointment may cancel. The other
    /// party is notified. Cancelling twice is a no-op.
    pub async fn cancel(&self, appointment: Appointment, actor: &User) -> Result<Appointment, AppError> {
        let is_client = actor.id == appointment.client_id;
        let is_barber = actor.id == appointment.barber_id;
        if !is_client && !is_barber {
            return Err(AppError::Forbidden("Only the client or the barber can cancel this appointment".into()));
        }

        if !appointment.is_active() {
            return Ok(appointment);
        }

        let message = format!(
            "The appointment on {} was cancelled by {}.",
            appointment.start_time.format("%d/%m %H:%M"),
            actor.username
        );

        let recipient = if is_client { appointment.barber_id.clone() } else { appointment.client_id.clone() };
        let notice = Notification::new(recipient, message.clone());

        let Some(cancelled) = self.appointment_repo
            .set_status(&appointment.id, STATUS_CANCELLED, Some(&message), Some(&notice))
            .await? else {
            // Cancelled concurrently; whoever won has already notified.
            return self.appointment_repo.find_by_id(&appointment.shop_id, &appointment.id).await?
                .ok_or(AppError::NotFound("Appointment not found".into()));
        };

        info!("Appointment cancelled: {} by {}", cancelled.id, actor.id);
        Ok(cancelled)
    }

    async fn load_schedule(
        &self,
        barber_id: &str,
        day: NaiveDate,
        span: &TimeRange,
    ) -> Result<(Vec<AvailabilityWindow>, BookingLedger), AppError> {
        let windows = self.availability_repo.list_for_day(barber_id, day).await?;
        let booked = self.appointment_repo.list_active_overlapping(barber_id, span).await?;
        Ok((windows, BookingLedger::from_appointments(&booked)))
    }
}
