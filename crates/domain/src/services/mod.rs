//! Domain services.

pub mod geo;
pub mod push;

pub use push::{MockPushSender, PushOutcome, PushSender, ReminderPayload};
