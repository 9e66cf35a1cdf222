use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use crate::domain::models::appointment::Appointment;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub barber_id: String,
    pub service_id: String,
    pub date: String,
    pub slots: Vec<String>,
}

#[derive(Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub shop_id: String,
    pub client_id: String,
    pub barber_id: String,
    pub service_id: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
    pub cancellation_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        let end_time = a.end_time();
        Self {
            id: a.id,
            shop_id: a.shop_id,
            client_id: a.client_id,
            barber_id: a.barber_id,
            service_id: a.service_id,
            start_time: a.start_time,
            end_time,
            status: a.status,
            cancellation_message: a.cancellation_message,
            created_at: a.created_at,
        }
    }
}
