//! Application services: reminder scheduling and push delivery.

pub mod reminder_engine;
pub mod reminder_slots;
pub mod web_push;

pub use reminder_engine::{ReminderEngine, ReminderSettings, RunSummary};
pub use web_push::WebPushSender;
