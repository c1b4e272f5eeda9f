//! Notification log domain model.

use chrono::NaiveDate;

/// Composite key of a logical reminder instance, one row per key in the
/// append-only notification log.
///
/// - `entry_time` is the "HH:MM" *label* of the reminder instant (for lead
///   reminders this is the lead instant, not the scheduled entry),
/// - `schedule_date` is the civil date the reminder belongs to, which for
///   post-midnight exit waves is the *originating* day,
/// - `entry_slot` is the employee's real slot (1 or 2) for entry reminders
///   and the reserved sentinel 0 for exit reminders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderKey {
    pub employee_id: i32,
    pub entry_time: String,
    pub schedule_date: NaiveDate,
    pub entry_slot: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_key_equality() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let a = ReminderKey {
            employee_id: 1,
            entry_time: "08:55".to_string(),
            schedule_date: date,
            entry_slot: 1,
        };
        let b = ReminderKey {
            entry_time: "09:00".to_string(),
            ..a.clone()
        };
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
