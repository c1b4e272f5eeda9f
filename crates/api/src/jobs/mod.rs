//! Background jobs.

pub mod reminders;
pub mod scheduler;

pub use reminders::ReminderJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
