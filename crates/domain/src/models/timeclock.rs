//! Clock entry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One clock-in/clock-out record.
///
/// An entry is *open* while `entry_time` is set and `exit_time` is not. The
/// clock-in operation rejects a new entry while one is open, so an employee
/// has at most one open entry at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockEntry {
    pub id: i32,
    pub employee_id: i32,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub is_late: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClockEntry {
    /// Whether this entry is still open (clocked in, not yet out).
    pub fn is_open(&self) -> bool {
        self.entry_time.is_some() && self.exit_time.is_none()
    }
}

/// Clock-in/clock-out request: the employee's current GPS position.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: f64,
}

/// Clock-in response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInResponse {
    pub entry_id: i32,
    pub is_late: bool,
}

/// Admin correction of a clock entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CorrectClockEntryRequest {
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub is_late: Option<bool>,
}

impl CorrectClockEntryRequest {
    /// Validate the exit-after-entry invariant against the resulting row.
    pub fn check_times(
        &self,
        current_entry: Option<DateTime<Utc>>,
        current_exit: Option<DateTime<Utc>>,
    ) -> Result<(), String> {
        let entry = self.entry_time.or(current_entry);
        let exit = self.exit_time.or(current_exit);
        match (entry, exit) {
            (Some(entry), Some(exit)) if exit <= entry => {
                Err("Exit time must be after entry time".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(entry: Option<DateTime<Utc>>, exit: Option<DateTime<Utc>>) -> ClockEntry {
        ClockEntry {
            id: 1,
            employee_id: 1,
            entry_time: entry,
            exit_time: exit,
            is_late: false,
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_open() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        assert!(entry(Some(t), None).is_open());
        assert!(!entry(Some(t), Some(t + chrono::Duration::hours(8))).is_open());
        assert!(!entry(None, None).is_open());
    }

    #[test]
    fn test_correction_rejects_exit_before_entry() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let req = CorrectClockEntryRequest {
            entry_time: None,
            exit_time: Some(t - chrono::Duration::hours(1)),
            is_late: None,
        };
        assert!(req.check_times(Some(t), None).is_err());
    }

    #[test]
    fn test_correction_accepts_valid_times() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let req = CorrectClockEntryRequest {
            entry_time: Some(t),
            exit_time: Some(t + chrono::Duration::hours(8)),
            is_late: Some(true),
        };
        assert!(req.check_times(None, None).is_ok());
    }
}
