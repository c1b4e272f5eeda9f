//! Clock entry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the timeclocks table.
#[derive(Debug, Clone, FromRow)]
pub struct ClockEntryEntity {
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

impl From<ClockEntryEntity> for domain::models::ClockEntry {
    fn from(entity: ClockEntryEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            entry_time: entity.entry_time,
            exit_time: entity.exit_time,
            is_late: entity.is_late,
            latitude: entity.latitude,
            longitude: entity.longitude,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
