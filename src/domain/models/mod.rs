pub mod appointment;
pub mod availability;
pub mod notification;
pub mod service;
pub mod shop;
pub mod time_range;
pub mod user;
