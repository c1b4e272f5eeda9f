//! Incident entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::incident::{IncidentStatus, IncidentType};
use sqlx::FromRow;

/// Database row mapping for the incidents table.
#[derive(Debug, Clone, FromRow)]
pub struct IncidentEntity {
    pub id: i32,
    pub employee_id: i32,
    pub timeclock_id: Option<i32>,
    #[sqlx(rename = "type")]
    pub incident_type: IncidentType,
    pub reason: String,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IncidentEntity> for domain::models::Incident {
    fn from(entity: IncidentEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            timeclock_id: entity.timeclock_id,
            incident_type: entity.incident_type,
            reason: entity.reason,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
