//! Domain models for the Timeclock backend.

pub mod employee;
pub mod incident;
pub mod notification_log;
pub mod push_subscription;
pub mod restaurant;
pub mod schedule;
pub mod timeclock;

pub use employee::Employee;
pub use incident::Incident;
pub use notification_log::ReminderKey;
pub use push_subscription::PushSubscription;
pub use restaurant::Restaurant;
pub use schedule::{EntrySlot, NewScheduleSlot, ScheduleSlot, Weekday, EXIT_REMINDER_SLOT};
pub use timeclock::ClockEntry;
