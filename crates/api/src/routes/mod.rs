//! HTTP route handlers.

pub mod auth;
pub mod cron;
pub mod employees;
pub mod health;
pub mod incidents;
pub mod push;
pub mod restaurants;
pub mod schedules;
pub mod timeclocks;
