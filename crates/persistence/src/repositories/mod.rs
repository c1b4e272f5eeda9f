//! Repository implementations for database operations.

mod employee;
mod incident;
mod notification_log;
mod push_subscription;
mod restaurant;
mod schedule;
mod timeclock;

pub use employee::EmployeeRepository;
pub use incident::IncidentRepository;
pub use notification_log::NotificationLogRepository;
pub use push_subscription::PushSubscriptionRepository;
pub use restaurant::RestaurantRepository;
pub use schedule::ScheduleRepository;
pub use timeclock::TimeclockRepository;
