//! Entity definitions (database row mappings).

mod employee;
mod incident;
mod push_subscription;
mod restaurant;
mod schedule;
mod timeclock;

pub use employee::EmployeeEntity;
pub use incident::IncidentEntity;
pub use push_subscription::PushSubscriptionEntity;
pub use restaurant::RestaurantEntity;
pub use schedule::ScheduleSlotEntity;
pub use timeclock::ClockEntryEntity;
