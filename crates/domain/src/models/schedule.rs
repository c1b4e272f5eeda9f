//! Weekly schedule domain model.
//!
//! Schedules are stored as one row per (employee, weekday, entry slot). A
//! non-working day is marked by a sentinel row (`entry_slot = First`,
//! `entry_time = "00:00"`, `is_work_day = false`) so the engine can tell
//! "day off" apart from "no schedule configured".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Entry slot value reserved for exit-reminder log rows. Distinct from any
/// real slot so entry and exit reminders never collide in the dedup ledger.
pub const EXIT_REMINDER_SLOT: i16 = 0;

/// Day of the week, Sunday-first to match the stored `day_of_week` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All days in storage order (Sunday = 0).
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Build from a 0-6 index (Sunday = 0).
    pub fn from_index(index: u32) -> Option<Weekday> {
        Self::ALL.get(index as usize).copied()
    }

    /// Storage index, 0-6 with Sunday = 0.
    pub fn as_index(&self) -> i16 {
        *self as i16
    }
}

/// First or second work period of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntrySlot {
    First,
    Second,
}

impl EntrySlot {
    /// Storage value: 1 for the first period, 2 for the second.
    pub fn as_i16(&self) -> i16 {
        match self {
            EntrySlot::First => 1,
            EntrySlot::Second => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<EntrySlot> {
        match value {
            1 => Some(EntrySlot::First),
            2 => Some(EntrySlot::Second),
            _ => None,
        }
    }
}

/// One stored schedule row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: i32,
    pub employee_id: i32,
    pub day_of_week: Weekday,
    pub entry_slot: EntrySlot,
    /// Local wall-clock entry time, "HH:MM".
    pub entry_time: String,
    pub is_work_day: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A schedule row to insert (wholesale replace writes these).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleSlot {
    pub day_of_week: Weekday,
    pub entry_slot: EntrySlot,
    pub entry_time: String,
    pub is_work_day: bool,
}

/// Admin input for one day of the weekly schedule.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DayScheduleInput {
    #[validate(length(max = 5, message = "Entry time must be HH:MM"))]
    pub entry1: Option<String>,

    #[validate(length(max = 5, message = "Entry time must be HH:MM"))]
    pub entry2: Option<String>,

    #[serde(default)]
    pub is_active: bool,
}

/// Admin input for a full week, one field per weekday.
///
/// Fixed shape instead of a day-name keyed map: a missing day simply means
/// "not a work day".
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyScheduleInput {
    #[serde(default)]
    #[validate(nested)]
    pub sunday: DayScheduleInput,
    #[serde(default)]
    #[validate(nested)]
    pub monday: DayScheduleInput,
    #[serde(default)]
    #[validate(nested)]
    pub tuesday: DayScheduleInput,
    #[serde(default)]
    #[validate(nested)]
    pub wednesday: DayScheduleInput,
    #[serde(default)]
    #[validate(nested)]
    pub thursday: DayScheduleInput,
    #[serde(default)]
    #[validate(nested)]
    pub friday: DayScheduleInput,
    #[serde(default)]
    #[validate(nested)]
    pub saturday: DayScheduleInput,
}

impl WeeklyScheduleInput {
    /// The input for a given day.
    pub fn day(&self, day: Weekday) -> &DayScheduleInput {
        match day {
            Weekday::Sunday => &self.sunday,
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
        }
    }

    /// Expand the week into the rows a wholesale replace writes.
    ///
    /// Inactive days produce the non-working sentinel row; active days
    /// produce one row per non-empty entry, at most one per slot.
    pub fn to_slots(&self) -> Vec<NewScheduleSlot> {
        let mut slots = Vec::new();
        for day in Weekday::ALL {
            let input = self.day(day);
            if !input.is_active {
                slots.push(NewScheduleSlot {
                    day_of_week: day,
                    entry_slot: EntrySlot::First,
                    entry_time: "00:00".to_string(),
                    is_work_day: false,
                });
                continue;
            }
            if let Some(entry1) = non_empty(&input.entry1) {
                slots.push(NewScheduleSlot {
                    day_of_week: day,
                    entry_slot: EntrySlot::First,
                    entry_time: entry1,
                    is_work_day: true,
                });
            }
            if let Some(entry2) = non_empty(&input.entry2) {
                slots.push(NewScheduleSlot {
                    day_of_week: day,
                    entry_slot: EntrySlot::Second,
                    entry_time: entry2,
                    is_work_day: true,
                });
            }
        }
        slots
    }

    /// Rebuild the weekly view from stored rows (inverse of `to_slots`).
    pub fn from_slots(slots: &[ScheduleSlot]) -> Self {
        let mut week = WeeklyScheduleInput::default();
        for slot in slots {
            let day = match slot.day_of_week {
                Weekday::Sunday => &mut week.sunday,
                Weekday::Monday => &mut week.monday,
                Weekday::Tuesday => &mut week.tuesday,
                Weekday::Wednesday => &mut week.wednesday,
                Weekday::Thursday => &mut week.thursday,
                Weekday::Friday => &mut week.friday,
                Weekday::Saturday => &mut week.saturday,
            };
            if !slot.is_work_day {
                day.is_active = false;
                continue;
            }
            day.is_active = true;
            match slot.entry_slot {
                EntrySlot::First => day.entry1 = Some(slot.entry_time.clone()),
                EntrySlot::Second => day.entry2 = Some(slot.entry_time.clone()),
            }
        }
        week
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: Weekday, slot: EntrySlot, time: &str, work: bool) -> ScheduleSlot {
        ScheduleSlot {
            id: 1,
            employee_id: 7,
            day_of_week: day,
            entry_slot: slot,
            entry_time: time.to_string(),
            is_work_day: work,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_weekday_from_index() {
        assert_eq!(Weekday::from_index(0), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_index(6), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_entry_slot_roundtrip() {
        assert_eq!(EntrySlot::from_i16(1), Some(EntrySlot::First));
        assert_eq!(EntrySlot::from_i16(2), Some(EntrySlot::Second));
        assert_eq!(EntrySlot::from_i16(0), None);
        assert_eq!(EntrySlot::Second.as_i16(), 2);
    }

    #[test]
    fn test_exit_sentinel_distinct_from_real_slots() {
        assert_ne!(EXIT_REMINDER_SLOT, EntrySlot::First.as_i16());
        assert_ne!(EXIT_REMINDER_SLOT, EntrySlot::Second.as_i16());
    }

    #[test]
    fn test_to_slots_inactive_day_sentinel() {
        let week = WeeklyScheduleInput::default();
        let slots = week.to_slots();
        assert_eq!(slots.len(), 7);
        assert!(slots.iter().all(|s| !s.is_work_day));
        assert!(slots.iter().all(|s| s.entry_time == "00:00"));
        assert!(slots.iter().all(|s| s.entry_slot == EntrySlot::First));
    }

    #[test]
    fn test_to_slots_split_shift() {
        let week = WeeklyScheduleInput {
            monday: DayScheduleInput {
                entry1: Some("09:00".to_string()),
                entry2: Some("17:00".to_string()),
                is_active: true,
            },
            ..Default::default()
        };
        let slots = week.to_slots();
        let monday: Vec<_> = slots
            .iter()
            .filter(|s| s.day_of_week == Weekday::Monday)
            .collect();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].entry_slot, EntrySlot::First);
        assert_eq!(monday[0].entry_time, "09:00");
        assert_eq!(monday[1].entry_slot, EntrySlot::Second);
        assert_eq!(monday[1].entry_time, "17:00");
    }

    #[test]
    fn test_to_slots_skips_blank_entries() {
        let week = WeeklyScheduleInput {
            tuesday: DayScheduleInput {
                entry1: Some("  ".to_string()),
                entry2: None,
                is_active: true,
            },
            ..Default::default()
        };
        let tuesday_rows = week
            .to_slots()
            .into_iter()
            .filter(|s| s.day_of_week == Weekday::Tuesday)
            .count();
        assert_eq!(tuesday_rows, 0);
    }

    #[test]
    fn test_from_slots_roundtrip() {
        let stored = vec![
            slot(Weekday::Monday, EntrySlot::First, "09:00", true),
            slot(Weekday::Monday, EntrySlot::Second, "17:30", true),
            slot(Weekday::Sunday, EntrySlot::First, "00:00", false),
        ];
        let week = WeeklyScheduleInput::from_slots(&stored);
        assert!(week.monday.is_active);
        assert_eq!(week.monday.entry1.as_deref(), Some("09:00"));
        assert_eq!(week.monday.entry2.as_deref(), Some("17:30"));
        assert!(!week.sunday.is_active);
        assert!(!week.friday.is_active);
    }
}
