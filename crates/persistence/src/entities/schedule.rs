//! Schedule slot entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{EntrySlot, ScheduleSlot, Weekday};
use sqlx::FromRow;

/// Database row mapping for the schedules table.
///
/// `day_of_week` and `entry_slot` are stored as small integers; conversion
/// to the domain enums can fail on corrupt data, so it is a `TryFrom`.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleSlotEntity {
    pub id: i32,
    pub employee_id: i32,
    pub day_of_week: i16,
    pub entry_slot: i16,
    pub entry_time: String,
    pub is_work_day: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ScheduleSlotEntity> for ScheduleSlot {
    type Error = String;

    fn try_from(entity: ScheduleSlotEntity) -> Result<Self, Self::Error> {
        let day_of_week = u32::try_from(entity.day_of_week)
            .ok()
            .and_then(Weekday::from_index)
            .ok_or_else(|| format!("invalid day_of_week {}", entity.day_of_week))?;
        let entry_slot = EntrySlot::from_i16(entity.entry_slot)
            .ok_or_else(|| format!("invalid entry_slot {}", entity.entry_slot))?;

        Ok(Self {
            id: entity.id,
            employee_id: entity.employee_id,
            day_of_week,
            entry_slot,
            entry_time: entity.entry_time,
            is_work_day: entity.is_work_day,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(day: i16, slot: i16) -> ScheduleSlotEntity {
        ScheduleSlotEntity {
            id: 1,
            employee_id: 7,
            day_of_week: day,
            entry_slot: slot,
            entry_time: "09:00".to_string(),
            is_work_day: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_row_converts() {
        let slot = ScheduleSlot::try_from(entity(1, 2)).unwrap();
        assert_eq!(slot.day_of_week, Weekday::Monday);
        assert_eq!(slot.entry_slot, EntrySlot::Second);
    }

    #[test]
    fn test_invalid_day_rejected() {
        assert!(ScheduleSlot::try_from(entity(7, 1)).is_err());
        assert!(ScheduleSlot::try_from(entity(-1, 1)).is_err());
    }

    #[test]
    fn test_invalid_slot_rejected() {
        assert!(ScheduleSlot::try_from(entity(1, 0)).is_err());
        assert!(ScheduleSlot::try_from(entity(1, 3)).is_err());
    }
}
