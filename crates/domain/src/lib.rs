//! Domain layer for the Timeclock backend.
//!
//! This crate contains:
//! - Domain models (Restaurant, Employee, schedules, clock entries)
//! - Push-delivery abstractions and payloads
//! - Geolocation validation

pub mod models;
pub mod services;
