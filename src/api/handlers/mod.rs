pub mod appointment;
pub mod availability;
pub mod health;
pub mod member;
pub mod notification;
pub mod service;
pub mod shop;
