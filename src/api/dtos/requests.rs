use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use crate::error::AppError;

pub fn parse_day(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    let value = required(value, field)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

#[derive(Deserialize)]
pub struct CreateShopRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl CreateShopRequest {
    pub fn name(&self) -> Result<String, AppError> {
        required_text(self.name.clone(), "name")
    }
}

#[derive(Deserialize)]
pub struct RegisterClientRequest {
    pub username: Option<String>,
    pub phone: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
}

pub struct ValidClient {
    pub username: String,
    pub phone: String,
}

impl RegisterClientRequest {
    pub fn validate(&self) -> Result<ValidClient, AppError> {
        Ok(ValidClient {
            username: required_text(self.username.clone(), "username")?,
            phone: required_text(self.phone.clone(), "phone")?,
        })
    }
}

#[derive(Deserialize)]
pub struct OnboardBarberRequest {
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub commission_pct: Option<f64>,
}

impl OnboardBarberRequest {
    pub fn username(&self) -> Result<String, AppError> {
        required_text(self.username.clone(), "username")
    }

    pub fn commission_pct(&self) -> Result<f64, AppError> {
        let pct = self.commission_pct.unwrap_or(0.0);
        if !(0.0..=100.0).contains(&pct) {
            return Err(AppError::Validation("commission_pct must be between 0 and 100".into()));
        }
        Ok(pct)
    }
}

fn check_price(price_cents: i64) -> Result<i64, AppError> {
    if price_cents < 0 {
        return Err(AppError::Validation("price_cents must not be negative".into()));
    }
    Ok(price_cents)
}

fn check_duration(duration_min: i32) -> Result<i32, AppError> {
    if duration_min <= 0 {
        return Err(AppError::Validation("duration_min must be positive".into()));
    }
    Ok(duration_min)
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub barber_id: Option<String>,
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub duration_min: Option<i32>,
}

pub struct ValidService {
    pub barber_id: String,
    pub name: String,
    pub price_cents: i64,
    pub duration_min: i32,
}

impl CreateServiceRequest {
    pub fn validate(self) -> Result<ValidService, AppError> {
        Ok(ValidService {
            barber_id: required(self.barber_id, "barber_id")?,
            name: required_text(self.name, "name")?,
            price_cents: check_price(required(self.price_cents, "price_cents")?)?,
            duration_min: check_duration(required(self.duration_min, "duration_min")?)?,
        })
    }
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub duration_min: Option<i32>,
}

impl UpdateServiceRequest {
    pub fn checked_name(&self) -> Result<Option<String>, AppError> {
        self.name.clone().map(|n| required_text(Some(n), "name")).transpose()
    }

    pub fn checked_price(&self) -> Result<Option<i64>, AppError> {
        self.price_cents.map(check_price).transpose()
    }

    pub fn checked_duration(&self) -> Result<Option<i32>, AppError> {
        self.duration_min.map(check_duration).transpose()
    }
}

#[derive(Deserialize)]
pub struct CreateAvailabilityRequest {
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl CreateAvailabilityRequest {
    pub fn validate(&self) -> Result<(NaiveDate, NaiveTime, NaiveTime), AppError> {
        let day = parse_day(&required(self.day.clone(), "day")?)?;
        let start = parse_time(&required(self.start_time.clone(), "start_time")?)?;
        let end = parse_time(&required(self.end_time.clone(), "end_time")?)?;
        Ok((day, start, end))
    }
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub from: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub barber_id: Option<String>,
    pub day: Option<String>,
    pub service_id: Option<String>,
}

pub struct ValidSlotsQuery {
    pub barber_id: String,
    pub day: NaiveDate,
    pub service_id: String,
}

impl SlotsQuery {
    pub fn validate(self) -> Result<ValidSlotsQuery, AppError> {
        Ok(ValidSlotsQuery {
            barber_id: required(self.barber_id, "barber_id")?,
            day: parse_day(&required(self.day, "day")?)?,
            service_id: required(self.service_id, "service_id")?,
        })
    }
}

#[derive(Deserialize)]
pub struct BookAppointmentRequest {
    pub client_id: Option<String>,
    pub barber_id: Option<String>,
    pub service_id: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
}

pub struct ValidBooking {
    pub client_id: String,
    pub barber_id: String,
    pub service_id: String,
    pub day: NaiveDate,
    pub time: NaiveTime,
}

impl BookAppointmentRequest {
    pub fn validate(self) -> Result<ValidBooking, AppError> {
        Ok(ValidBooking {
            client_id: required(self.client_id, "client_id")?,
            barber_id: required(self.barber_id, "barber_id")?,
            service_id: required(self.service_id, "service_id")?,
            day: parse_day(&required(self.day, "day")?)?,
            time: parse_time(&required(self.time, "time")?)?,
        })
    }
}

#[derive(Deserialize)]
pub struct AppointmentListQuery {
    pub barber_id: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ServiceListQuery {
    pub barber_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelAppointmentRequest {
    pub actor_id: Option<String>,
}

impl CancelAppointmentRequest {
    pub fn actor_id(self) -> Result<String, AppError> {
        required(self.actor_id, "actor_id")
    }
}
