//! Timeclock API: axum application, reminder engine and background jobs.

pub mod app;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod routes;
pub mod services;
